//! Typed LCU endpoints, grouped the way the client groups its plugins.
//!
//! Each trait is implemented for every [`LcuRequest`].

use super::traits::LcuRequest;

pub mod champ_select;
pub mod chat;
pub mod game_data;
pub mod gameflow;
pub mod match_history;
pub mod summoner;

pub use champ_select::{
    ActionDto, BenchChampionDto, ChampSelectApi, ChampSelectSessionDto, TeamMemberDto,
};
pub use chat::{ChatApi, ConversationDto, MessageDto};
pub use game_data::{ChampionDto, ChampionSummaryDto, GameDataApi};
pub use gameflow::{GameflowApi, GameflowSessionDto};
pub use match_history::{GameDetailDto, GameDto, MatchHistoryApi};
pub use summoner::{SummonerApi, SummonerDto};

/// All APIs required by the companion engine.
pub trait LcuApiFull:
    SummonerApi + GameflowApi + ChatApi + MatchHistoryApi + ChampSelectApi + GameDataApi
{
}

impl<T: LcuRequest> SummonerApi for T {}
impl<T: LcuRequest> GameflowApi for T {}
impl<T: LcuRequest> ChatApi for T {}
impl<T: LcuRequest> MatchHistoryApi for T {}
impl<T: LcuRequest> ChampSelectApi for T {}
impl<T: LcuRequest> GameDataApi for T {}
impl<T: LcuRequest> LcuApiFull for T {}
