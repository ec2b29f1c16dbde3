use axum::{
    extract::{Path, Query},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::access::{self, Capability};
use crate::errors::ApiError;
use crate::models::{ApiKey, PlayerStatistics, ProclubsMatch};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matches", get(recent_matches))
        .route("/matches/:match_id", get(match_by_id))
        .route("/statistics/players", get(player_statistics))
        .route("/analytics/advanced", get(advanced_analytics))
}

// Mock data for demonstration
pub fn mock_matches() -> Vec<ProclubsMatch> {
    vec![
        ProclubsMatch {
            match_id: "match_001",
            club_name: "FC Champions",
            opponent_name: "United FC",
            result: "W",
            goals_for: 3,
            goals_against: 1,
            date: "2024-01-15",
            competition: "Division 1",
        },
        ProclubsMatch {
            match_id: "match_002",
            club_name: "FC Champions",
            opponent_name: "City Rovers",
            result: "D",
            goals_for: 2,
            goals_against: 2,
            date: "2024-01-18",
            competition: "Division 1",
        },
        ProclubsMatch {
            match_id: "match_003",
            club_name: "FC Champions",
            opponent_name: "Athletic Club",
            result: "L",
            goals_for: 1,
            goals_against: 2,
            date: "2024-01-20",
            competition: "Division 1",
        },
    ]
}

pub fn mock_player_stats() -> Vec<PlayerStatistics> {
    vec![
        PlayerStatistics {
            player_id: "player_001",
            player_name: "John Striker",
            position: "ST",
            matches: 25,
            goals: 18,
            assists: 7,
            clean_sheets: 0,
            rating: 8.5,
        },
        PlayerStatistics {
            player_id: "player_002",
            player_name: "Mike Midfielder",
            position: "CM",
            matches: 25,
            goals: 5,
            assists: 12,
            clean_sheets: 0,
            rating: 7.8,
        },
    ]
}

#[derive(Debug, Deserialize)]
pub struct MatchesQuery {
    pub limit: Option<usize>,
}

// Available to all tiers
async fn recent_matches(
    Extension(api_key): Extension<ApiKey>,
    Query(query): Query<MatchesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    access::authorize(api_key.tier, Capability::RecentMatches)?;

    let limit = query.limit.unwrap_or(10);
    let matches: Vec<_> = mock_matches().into_iter().take(limit).collect();

    Ok(Json(json!({
        "success": true,
        "data": matches,
        "meta": {
            "total": matches.len(),
            "tier": api_key.tier,
            "requestCount": api_key.request_count,
        }
    })))
}

// Available to all tiers
async fn match_by_id(
    Extension(api_key): Extension<ApiKey>,
    Path(match_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    access::authorize(api_key.tier, Capability::MatchById)?;

    let found = mock_matches()
        .into_iter()
        .find(|m| m.match_id == match_id)
        .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": found,
    })))
}

// Requires Basic or Premium tier
async fn player_statistics(
    Extension(api_key): Extension<ApiKey>,
) -> Result<Json<serde_json::Value>, ApiError> {
    access::authorize(api_key.tier, Capability::PlayerStatistics)?;

    let stats = mock_player_stats();

    Ok(Json(json!({
        "success": true,
        "data": stats,
        "meta": {
            "total": stats.len(),
            "tier": api_key.tier,
        }
    })))
}

// Requires Premium tier
async fn advanced_analytics(
    Extension(api_key): Extension<ApiKey>,
) -> Result<Json<serde_json::Value>, ApiError> {
    access::authorize(api_key.tier, Capability::AdvancedAnalytics)?;

    let top_scorer = mock_player_stats().into_iter().next();

    Ok(Json(json!({
        "success": true,
        "data": {
            "winRate": 0.68,
            "avgGoalsFor": 2.3,
            "avgGoalsAgainst": 1.2,
            "form": ["W", "W", "L", "W", "D"],
            "topScorer": top_scorer,
            "predictionNextMatch": {
                "confidence": 0.72,
                "predictedResult": "W",
            }
        },
        "meta": {
            "tier": api_key.tier,
            "premiumFeature": true,
        }
    })))
}
