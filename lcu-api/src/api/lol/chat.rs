use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use urlencoding::encode;

use crate::{
    api::traits::{LcuRequest, decode},
    types::LcuApiResponse,
};

const CONVERSATIONS_ROUTE: &str = "/lol-chat/v1/conversations";

/// Conversation type of the champion-select room.
pub const CHAMP_SELECT_CONVERSATION: &str = "championSelect";
/// Body of the system message posted when a player joins a room.
pub const JOINED_ROOM_BODY: &str = "joined_room";

fn messages_route(conversation_id: &str) -> String {
    format!(
        "{}/{}/messages",
        CONVERSATIONS_ROUTE,
        encode(conversation_id)
    )
}

#[async_trait]
pub trait ChatApi: LcuRequest {
    async fn get_conversations(&self) -> LcuApiResponse<Vec<ConversationDto>> {
        decode(self.get(CONVERSATIONS_ROUTE).await?)
    }

    /// Id of the champion-select conversation, if the room exists yet.
    async fn get_champ_select_conversation_id(&self) -> LcuApiResponse<Option<String>> {
        Ok(self
            .get_conversations()
            .await?
            .into_iter()
            .find(|c| c.kind == CHAMP_SELECT_CONVERSATION)
            .map(|c| c.id))
    }

    async fn get_messages(&self, conversation_id: &str) -> LcuApiResponse<Vec<MessageDto>> {
        decode(self.get(&messages_route(conversation_id)).await?)
    }

    async fn send_message(&self, conversation_id: &str, body: &str) -> LcuApiResponse<()> {
        tracing::info!("💬 {}", body);
        self.post(
            &messages_route(conversation_id),
            Some(json!({ "body": body, "type": "chat" })),
        )
        .await?;
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    #[serde(default)]
    pub body: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub from_summoner_id: u64,
}

impl MessageDto {
    pub fn is_join_notice(&self) -> bool {
        self.kind == "system" && self.body == JOINED_ROOM_BODY
    }
}
