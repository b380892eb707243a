use perch_brain::BrainStore;
use perch_core::Brain;

#[test]
fn persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("brain.db");

    {
        let store = BrainStore::open(&db_path).unwrap();
        store.write("U1", "step", "4").unwrap();
        store.write("C9", "C9|SKILL_SECRET", "s3cret").unwrap();
    }

    let store = BrainStore::open(&db_path).unwrap();
    assert_eq!(store.get("U1", "step").unwrap(), Some("4".into()));
    assert_eq!(
        store.get("C9", "C9|SKILL_SECRET").unwrap(),
        Some("s3cret".into())
    );
}

#[test]
fn creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("dir").join("brain.db");

    let store = BrainStore::open(&db_path).unwrap();
    store.write("U1", "k", "v").unwrap();
    assert!(db_path.exists());
}

#[tokio::test]
async fn scoped_handles_share_one_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("brain.db");
    let store = BrainStore::open(&db_path).unwrap();

    let user_brain = store.scoped("U1");
    let room_brain = store.scoped("C1");

    user_brain.write("step", "2").await.unwrap();
    room_brain.write("step", "7").await.unwrap();

    assert_eq!(user_brain.get("step").await.unwrap(), Some("2".into()));
    assert_eq!(room_brain.get("step").await.unwrap(), Some("7".into()));
}
