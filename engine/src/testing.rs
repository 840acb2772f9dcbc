//! In-memory League client used by the engine tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use lcu_companion_api::{
    EventSource, LcuApiError, LcuApiResponse, LcuRequest, Method, StatusCode,
};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Refused,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Replies are scripted per `"METHOD path"`. The last reply of a route
/// repeats, unknown routes answer 404.
#[derive(Debug, Default)]
pub struct FakeLcu {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeLcu {
    pub fn reply(&self, method: &str, path: &str, replies: Vec<Reply>) {
        self.replies
            .lock()
            .unwrap()
            .insert(format!("{} {}", method, path), replies.into());
    }

    pub fn reply_json(&self, method: &str, path: &str, value: Value) {
        self.reply(method, path, vec![Reply::Json(value)]);
    }

    pub fn reply_status(&self, method: &str, path: &str, status: u16) {
        self.reply(method, path, vec![Reply::Status(status)]);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.method.as_str() == method && call.path == path)
            .count()
    }

    /// Bodies of the chat messages posted, in order.
    pub fn sent_messages(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == Method::POST && call.path.ends_with("/messages"))
            .filter_map(|call| call.body?["body"].as_str().map(String::from))
            .collect()
    }

    /// Script a summoner, its one-page history and its join notice position.
    pub fn add_summoner(&self, summoner_id: u64, name: &str, games: Vec<Value>) {
        let puuid = format!("puuid-{}", summoner_id);
        self.reply_json(
            "GET",
            &format!("/lol-summoner/v1/summoners/{}", summoner_id),
            json!({"displayName": name, "puuid": puuid, "summonerId": summoner_id}),
        );
        self.reply_json(
            "GET",
            &format!(
                "/lol-match-history/v1/products/lol/{}/matches?begIndex=0&endIndex=20",
                puuid
            ),
            json!({"games": {"games": games}}),
        );
    }
}

#[async_trait]
impl LcuRequest for FakeLcu {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> LcuApiResponse<Value> {
        let key = format!("{} {}", method, path);
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(code)) if (200..300).contains(&code) => Ok(Value::Null),
            Some(Reply::Status(code)) => Err(LcuApiError::RequestFailed(
                StatusCode::from_u16(code).unwrap(),
            )),
            Some(Reply::Refused) => Err(LcuApiError::HostUnavailable),
            None => Err(LcuApiError::RequestFailed(StatusCode::NOT_FOUND)),
        }
    }
}

/// Event source replaying scripted frames, then ending.
#[derive(Default)]
pub struct ScriptedEvents {
    frames: VecDeque<LcuApiResponse<Option<String>>>,
}

impl ScriptedEvents {
    pub fn frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push_back(Ok(Some(frame.into())));
        self
    }

    pub fn phase(self, phase: &str) -> Self {
        self.frame(phase_frame(phase))
    }

    pub fn champ_select(self, session: Value) -> Self {
        self.frame(champ_select_frame(session))
    }

    pub fn error(mut self, error: LcuApiError) -> Self {
        self.frames.push_back(Err(error));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl EventSource for ScriptedEvents {
    async fn next_frame(&mut self) -> LcuApiResponse<Option<String>> {
        self.frames.pop_front().unwrap_or(Ok(None))
    }
}

pub fn phase_frame(phase: &str) -> String {
    json!([8, "OnJsonApiEvent_lol-gameflow_v1_gameflow-phase", {
        "uri": "/lol-gameflow/v1/gameflow-phase",
        "eventType": "Update",
        "data": phase
    }])
    .to_string()
}

pub fn champ_select_frame(session: Value) -> String {
    json!([8, "OnJsonApiEvent_lol-champ-select_v1_session", {
        "uri": "/lol-champ-select/v1/session",
        "eventType": "Update",
        "data": session
    }])
    .to_string()
}

/// One history entry as returned by the client.
pub fn history_game(game_id: u64, creation: i64, mode: &str, win: bool) -> Value {
    json!({
        "gameId": game_id,
        "gameCreation": creation,
        "gameDuration": 1_200,
        "gameMode": mode,
        "participants": [{
            "participantId": 1,
            "championId": 157,
            "stats": {
                "kills": 6, "deaths": 2, "assists": 8,
                "totalDamageDealtToChampions": 24_000,
                "win": win
            }
        }]
    })
}

pub fn join_notice(summoner_id: u64) -> Value {
    json!({"body": "joined_room", "type": "system", "fromSummonerId": summoner_id})
}
