//! The `sql` skill: run one of a fixed set of predefined queries and render
//! the result as a table.
//!
//! Free-form SQL from chat never reaches execution — the only path to
//! `run_query` is through the static name→SQL map. That boundary is the
//! point of the skill; do not widen it.

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::info;

use perch_core::{PerchError, Result, Skill, SkillContext};

/// The whitelist. Names are matched exactly against the raw argument.
const QUERIES: &[(&str, &str)] = &[
    (
        "newusers",
        "SELECT username, created_at \
         FROM users \
         ORDER BY created_at DESC \
         LIMIT 10;",
    ),
    (
        "usercount",
        "SELECT DATE(date_joined) AS day, COUNT(id) AS new_users \
         FROM users \
         GROUP BY DATE(date_joined);",
    ),
    (
        "reactions",
        "SELECT reaction_type, COUNT(reaction_id) AS reaction_count \
         FROM reactions \
         GROUP BY reaction_type \
         ORDER BY reaction_count DESC \
         LIMIT 7;",
    ),
];

pub struct SqlSkill;

fn render_cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(_) => "<blob>".into(),
    }
}

/// Render rows as a fenced markdown table.
fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from("```\n");
    out.push_str(&format!("| {} |\n", columns.join(" | ")));
    out.push_str(&format!(
        "|{}\n",
        columns.iter().map(|_| " --- |").collect::<String>()
    ));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out.push_str("```");
    out
}

/// Execute one whitelisted query against the configured database.
pub fn run_query(connstring: &str, sql: &str) -> Result<String> {
    let conn =
        Connection::open(connstring).map_err(|e| PerchError::Query(e.to_string()))?;
    let mut stmt = conn.prepare(sql).map_err(|e| PerchError::Query(e.to_string()))?;

    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();

    let mut rows_out: Vec<Vec<String>> = Vec::new();
    let mut rows = stmt.query([]).map_err(|e| PerchError::Query(e.to_string()))?;
    while let Some(row) = rows.next().map_err(|e| PerchError::Query(e.to_string()))? {
        let mut cells = Vec::with_capacity(column_count);
        for i in 0..column_count {
            let value = row
                .get_ref(i)
                .map_err(|e| PerchError::Query(e.to_string()))?;
            cells.push(render_cell(value));
        }
        rows_out.push(cells);
    }

    Ok(render_table(&columns, &rows_out))
}

#[async_trait]
impl Skill for SqlSkill {
    fn name(&self) -> &str {
        "sql"
    }

    fn description(&self) -> &str {
        "Run one of the predefined database queries and show the result"
    }

    fn usage(&self) -> &str {
        "sql — list the available query names\n\
         sql {name} — run that query"
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<()> {
        let name = ctx.arguments.trim();

        let Some((_, sql)) = QUERIES.iter().find(|(n, _)| *n == name) else {
            let mut listing = String::from("Available queries are: ");
            for (name, _) in QUERIES {
                listing.push_str(&format!("\n * {name}"));
            }
            ctx.reply(listing).await?;
            return Ok(());
        };

        let Some(connstring) = ctx.secrets.read("connstring") else {
            ctx.reply(
                "There's no connection string set up. Please add one before running this skill.",
            )
            .await?;
            return Ok(());
        };

        info!(query = name, "running whitelisted query");
        let table = run_query(&connstring, sql)?;
        ctx.reply(table).await
    }
}
