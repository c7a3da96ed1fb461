use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::prelude::Context;

use crate::services::ip_service;

pub const NAME: &str = "ip";
pub const DESCRIPTION: &str = "Get server public IP";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description(DESCRIPTION)
        .dm_permission(true)
}

pub async fn run(ctx: &Context, interaction: &CommandInteraction) -> serenity::Result<()> {
    let content = ip_service::ip_response(ctx).await;
    interaction
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().content(content),
            ),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptor() {
        let value = serde_json::to_value(register()).expect("command serializes");
        assert_eq!(value["name"], "ip");
        assert_eq!(value["description"], "Get server public IP");
        assert_eq!(value["dm_permission"], true);
    }
}
