pub mod ip;

use serenity::builder::CreateCommand;
use serenity::http::Http;
use serenity::model::application::{Command, CommandInteraction};
use serenity::model::id::GuildId;
use serenity::prelude::Context;
use tracing::{error, info};

/// Every command this bot offers, in registration order.
pub fn all() -> Vec<CreateCommand> {
    vec![ip::register()]
}

/// Register the command set with Discord, scoped to `guild_id` when one is
/// configured and globally otherwise. Returns the registered descriptors so
/// the caller can delete them by id later. Stops at the first failure,
/// leaving any commands registered so far in place.
pub async fn register_all(
    http: &Http,
    guild_id: Option<GuildId>,
) -> serenity::Result<Vec<Command>> {
    let mut registered = Vec::new();
    for builder in all() {
        let command = match guild_id {
            Some(guild) => guild.create_command(http, builder).await?,
            None => Command::create_global_command(http, builder).await?,
        };
        info!("Registered /{} ({})", command.name, command.id);
        registered.push(command);
    }
    Ok(registered)
}

/// Delete previously registered commands by id, in registration order.
/// Stops at the first failure, leaving the remaining registrations in place.
pub async fn unregister_all(
    http: &Http,
    guild_id: Option<GuildId>,
    registered: &[Command],
) -> serenity::Result<()> {
    for command in registered {
        match guild_id {
            Some(guild) => guild.delete_command(http, command.id).await?,
            None => Command::delete_global_command(http, command.id).await?,
        }
        info!("Removed /{} ({})", command.name, command.id);
    }
    Ok(())
}

/// Route a command interaction to its handler by name. Interactions for
/// commands this bot never registered are ignored; handler errors are
/// logged and never propagated back to the gateway.
pub async fn dispatch(ctx: &Context, interaction: &CommandInteraction) {
    let result = match interaction.data.name.as_str() {
        ip::NAME => ip::run(ctx, interaction).await,
        _ => return,
    };

    if let Err(e) = result {
        error!("Error executing /{}: {}", interaction.data.name, e);
    }
}
