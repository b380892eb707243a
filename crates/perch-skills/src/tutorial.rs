//! The `hello` skill: a fixed console tutorial with a per-user step cursor
//! persisted in the brain.

use async_trait::async_trait;

use perch_core::{Result, Skill, SkillContext};

/// The tutorial script, in order. The cursor wraps modulo this length.
pub const STEPS: [&str; 10] = [
    "Welcome to Perch!\n\
     This skill is a brief tutorial that walks through some things to try in the console.\n\
     Perch responds to commands called \"skills\". For example, `hello` is a skill (the one \
     you just called!).\n\
     To learn how to use a skill, type `help` followed by the skill name. Say \
     `@perch help hello` to learn how to use the `hello` skill. Then say `@perch hello again` \
     to move to the next step in the tutorial.",
    "Great! Now say `@perch help` for high level help. Remember, say `@perch hello again` to \
     move to the next step.",
    "Excellent! Say `@perch skills` to see the list of available skills.",
    "Capital! Skills can look things up for you. Say `@perch sql` to see the canned database \
     queries that ship with the console.",
    "Wonderful! Try one: say `@perch sql newusers` to run the `newusers` query against the \
     seeded database.",
    "Perfect! Some skills talk to the web. Say `@perch 404-finder https://example.com` to check \
     a page for broken links.",
    "Good. Skills can manage chat rooms too. Say `@perch help room` to see what room \
     administration looks like.",
    "Neat! The `tweet` skill posts to Twitter once you configure credentials. Say \
     `@perch help tweet` to see its commands.",
    "Nice! You can step backwards through this tutorial at any time with \
     `@perch hello previous`, or start over with `@perch hello reset`.",
    "Fantastic! That's all we have to show for now. Feel free to play around with the console. \
     When you're ready, wire Perch into your chat to use it with your team.",
];

pub struct TutorialSkill;

fn step_key(user_id: &str) -> String {
    format!("step{user_id}")
}

/// Advance with wraparound.
pub fn next_step(step: usize) -> usize {
    (step + 1) % STEPS.len()
}

/// Retreat with wraparound.
pub fn previous_step(step: usize) -> usize {
    (step + STEPS.len() - 1) % STEPS.len()
}

async fn get_step(ctx: &SkillContext) -> Result<usize> {
    let stored = ctx.brain.get(&step_key(&ctx.user.id)).await?;
    // Missing or garbled values read as step zero; oversized ones clamp
    // into range so the index is always valid.
    Ok(stored
        .and_then(|s| s.parse::<usize>().ok())
        .map(|i| i % STEPS.len())
        .unwrap_or(0))
}

async fn write_step(ctx: &SkillContext, step: usize) -> Result<()> {
    ctx.brain
        .write(&step_key(&ctx.user.id), &step.to_string())
        .await
}

#[async_trait]
impl Skill for TutorialSkill {
    fn name(&self) -> &str {
        "hello"
    }

    fn description(&self) -> &str {
        "A brief tutorial that walks through things to try in the console"
    }

    fn usage(&self) -> &str {
        "hello — repeat the current tutorial step\n\
         hello again (or next) — move to the next step\n\
         hello previous — move to the previous step\n\
         hello reset — start over from the first step"
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<()> {
        let command = ctx.arguments.trim();

        if command == "reset" {
            write_step(ctx, 0).await?;
        }

        let mut step = get_step(ctx).await?;

        match command {
            "again" | "next" => {
                step = next_step(step);
                write_step(ctx, step).await?;
            }
            "previous" => {
                step = previous_step(step);
                write_step(ctx, step).await?;
            }
            "help" => {
                ctx.reply(format!(
                    "Nice try! I think what you want is `@{} help hello` to get help on the \
                     `hello` skill.",
                    ctx.bot_name
                ))
                .await?;
            }
            _ => {}
        }

        ctx.reply(STEPS[step]).await
    }
}

#[cfg(test)]
mod tests {
    use perch_core::mock::test_context;
    use perch_core::Brain;

    use super::*;

    #[test]
    fn arithmetic_wraps_both_ways() {
        let n = STEPS.len();
        for i in 0..n {
            assert_eq!(next_step(i), (i + 1) % n);
            assert_eq!(previous_step(i), (i + n - 1) % n);
            assert!(next_step(i) < n);
            assert!(previous_step(i) < n);
        }
        assert_eq!(next_step(n - 1), 0);
        assert_eq!(previous_step(0), n - 1);
    }

    #[tokio::test]
    async fn first_invocation_replies_step_zero() {
        let t = test_context("hello", "");
        TutorialSkill.execute(&t.ctx).await.unwrap();
        assert_eq!(t.sink.texts(), vec![STEPS[0].to_string()]);
    }

    #[tokio::test]
    async fn again_advances_and_persists() {
        let t = test_context("hello", "again");
        TutorialSkill.execute(&t.ctx).await.unwrap();

        assert_eq!(t.sink.texts(), vec![STEPS[1].to_string()]);
        let stored = t.brain.get(&step_key(&t.ctx.user.id)).await.unwrap();
        assert_eq!(stored, Some("1".into()));
    }

    #[tokio::test]
    async fn previous_from_zero_wraps_to_last() {
        let t = test_context("hello", "previous");
        TutorialSkill.execute(&t.ctx).await.unwrap();

        assert_eq!(t.sink.texts(), vec![STEPS[STEPS.len() - 1].to_string()]);
    }

    #[tokio::test]
    async fn next_past_the_end_wraps_to_start() {
        let t = test_context("hello", "next");
        let key = step_key(&t.ctx.user.id);
        t.brain
            .write(&key, &(STEPS.len() - 1).to_string())
            .await
            .unwrap();

        TutorialSkill.execute(&t.ctx).await.unwrap();

        assert_eq!(t.sink.texts(), vec![STEPS[0].to_string()]);
        assert_eq!(t.brain.get(&key).await.unwrap(), Some("0".into()));
    }

    #[tokio::test]
    async fn reset_returns_to_step_zero() {
        let t = test_context("hello", "reset");
        let key = step_key(&t.ctx.user.id);
        t.brain.write(&key, "7").await.unwrap();

        TutorialSkill.execute(&t.ctx).await.unwrap();

        assert_eq!(t.sink.texts(), vec![STEPS[0].to_string()]);
        assert_eq!(t.brain.get(&key).await.unwrap(), Some("0".into()));
    }

    #[tokio::test]
    async fn garbled_cursor_reads_as_zero() {
        let t = test_context("hello", "");
        t.brain
            .write(&step_key(&t.ctx.user.id), "not-a-number")
            .await
            .unwrap();

        TutorialSkill.execute(&t.ctx).await.unwrap();
        assert_eq!(t.sink.texts(), vec![STEPS[0].to_string()]);
    }

    #[tokio::test]
    async fn help_redirects_and_still_replies_the_step() {
        let t = test_context("hello", "help");
        TutorialSkill.execute(&t.ctx).await.unwrap();

        let texts = t.sink.texts();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].contains("Nice try!"));
        assert_eq!(texts[1], STEPS[0]);
    }

    #[tokio::test]
    async fn unrelated_text_does_not_move_the_cursor() {
        let t = test_context("hello", "bananas");
        let key = step_key(&t.ctx.user.id);
        t.brain.write(&key, "4").await.unwrap();

        TutorialSkill.execute(&t.ctx).await.unwrap();

        assert_eq!(t.sink.texts(), vec![STEPS[4].to_string()]);
        assert_eq!(t.brain.get(&key).await.unwrap(), Some("4".into()));
    }
}
