//! The `room` skill: set topic/purpose, create, archive, and invite —
//! thin validation over the host's room operations.
//!
//! Whether a token is a room reference or a mention is decided by argument
//! kind, not position: `room topic #ops new topic` targets #ops, while
//! `room topic new topic` targets the room the command came from.

use async_trait::async_trait;

use perch_core::{Argument, Arguments, PerchError, Result, RoomRef, Skill, SkillContext};

pub struct RoomSkill;

/// The message the host attached to a failed operation, for quoting back
/// to chat.
fn host_message(err: PerchError) -> String {
    match err {
        PerchError::Room { reason, .. } => reason,
        other => other.to_string(),
    }
}

/// The target room (a leading room argument) or the current room, plus the
/// free text formed by the remaining tokens.
fn room_and_text(ctx: &SkillContext, args: &Arguments) -> (RoomRef, String) {
    match args.get(0) {
        Some(Argument::Room(room)) => (room.clone(), args.rest(1).value()),
        _ => (ctx.room.clone(), args.value()),
    }
}

async fn handle_topic(ctx: &SkillContext, args: &Arguments) -> Result<()> {
    if args.is_empty() {
        ctx.reply("Please specify a topic").await?;
        return Ok(());
    }
    let (room, topic) = room_and_text(ctx, args);
    match ctx.rooms.set_topic(&room, &topic).await {
        Ok(()) => ctx.reply("Room topic set successfully").await,
        Err(e) => {
            ctx.reply(format!("Error setting room topic {}", host_message(e)))
                .await
        }
    }
}

async fn handle_purpose(ctx: &SkillContext, args: &Arguments) -> Result<()> {
    if args.is_empty() {
        ctx.reply("Please specify a purpose").await?;
        return Ok(());
    }
    let (room, purpose) = room_and_text(ctx, args);
    match ctx.rooms.set_purpose(&room, &purpose).await {
        Ok(()) => ctx.reply("Room purpose set successfully").await,
        Err(e) => {
            ctx.reply(format!("Error setting room purpose {}", host_message(e)))
                .await
        }
    }
}

async fn create_room(ctx: &SkillContext, args: &Arguments) -> Result<()> {
    if args.len() != 1 {
        ctx.reply(format!(
            "Usage: `@{} {} create {{room-name}}`",
            ctx.bot_name, ctx.skill_name
        ))
        .await?;
        return Ok(());
    }
    let room_name = args.value();
    match ctx.rooms.create(&room_name).await {
        Ok(room) => {
            ctx.reply(format!(
                "Created room {room}. Invite users to the room with: \
                 `@{} {} invite {room} @mention1 @mention2 ... @mentionN`",
                ctx.bot_name, ctx.skill_name
            ))
            .await
        }
        Err(e) => {
            ctx.reply(format!("Error creating room {}", host_message(e)))
                .await
        }
    }
}

async fn archive_room(ctx: &SkillContext, args: &Arguments) -> Result<()> {
    let usage = format!(
        "Usage: `@{} {} archive {{#room-mention}}`",
        ctx.bot_name, ctx.skill_name
    );
    if args.len() != 1 {
        ctx.reply(&usage).await?;
        return Ok(());
    }
    let Some(Argument::Room(room)) = args.get(0) else {
        ctx.reply(&usage).await?;
        return Ok(());
    };
    match ctx.rooms.archive(room).await {
        Ok(()) => ctx.reply(format!("Archived room {}.", room.name)).await,
        Err(e) => {
            ctx.reply(format!("Error archiving room {}", host_message(e)))
                .await
        }
    }
}

async fn invite_users(ctx: &SkillContext, args: &Arguments) -> Result<()> {
    if args.len() < 2 {
        ctx.reply(format!(
            "Usage: `@{} {} invite {{#room}} {{@mention1}} {{@mention2}} ... {{@mentionN}}`",
            ctx.bot_name, ctx.skill_name
        ))
        .await?;
        return Ok(());
    }
    let Some(Argument::Room(room)) = args.get(0) else {
        ctx.reply(format!(
            "First argument must be a room reference. Usage: `@{} {} invite {{#room}} \
             {{@mention1}} {{@mention2}} ... {{@mentionN}}`",
            ctx.bot_name, ctx.skill_name
        ))
        .await?;
        return Ok(());
    };
    let users: Vec<_> = args.mentions().into_iter().cloned().collect();
    if users.is_empty() {
        ctx.reply("Need to mention at least one user to invite to the room.")
            .await?;
        return Ok(());
    }
    match ctx.rooms.invite(room, &users).await {
        Ok(()) => ctx.reply("Successfully invited users to room.").await,
        Err(e) => {
            ctx.reply(format!("Error inviting users to room {}", host_message(e)))
                .await
        }
    }
}

#[async_trait]
impl Skill for RoomSkill {
    fn name(&self) -> &str {
        "room"
    }

    fn description(&self) -> &str {
        "Create, archive, and administer chat rooms"
    }

    fn usage(&self) -> &str {
        "room create {room-name} — create a room\n\
         room topic [#room] {topic} — set a topic (current room if omitted)\n\
         room purpose [#room] {purpose} — set a purpose (current room if omitted)\n\
         room archive #room — archive a room\n\
         room invite #room @mention1 @mention2 ... — invite users to a room"
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<()> {
        if ctx.tokens.is_empty() {
            ctx.reply(format!(
                "`@{} help {}` for help on this skill.",
                ctx.bot_name, ctx.skill_name
            ))
            .await?;
            return Ok(());
        }

        let cmd = ctx.tokens.get(0).map(Argument::value).unwrap_or_default();
        let args = ctx.tokens.rest(1);

        match cmd.as_str() {
            "topic" => handle_topic(ctx, &args).await,
            "purpose" => handle_purpose(ctx, &args).await,
            "create" => create_room(ctx, &args).await,
            "invite" => invite_users(ctx, &args).await,
            "archive" => archive_room(ctx, &args).await,
            _ => {
                ctx.reply(format!(
                    "Unknown command. `@{} help {}` for help on this skill.",
                    ctx.bot_name, ctx.skill_name
                ))
                .await
            }
        }
    }
}
