//! Player and venue identities, and per-player serve statistics.

use crate::models::game::Side;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (supplied by the player registry).
pub type PlayerId = Uuid;

/// Unique identifier for a venue.
pub type VenueId = Uuid;

/// Serve and point statistics for one player in one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub player_id: PlayerId,
    pub team: Side,
    pub first_serves_in: u32,
    pub first_serves_total: u32,
    pub first_serve_won: u32,
    pub second_serves_in: u32,
    pub second_serves_total: u32,
    pub second_serve_won: u32,
    pub double_faults: u32,
    pub total_points_won: u32,
}

impl PlayerMatchStats {
    /// Zeroed stats for a player on the given side.
    pub fn new(player_id: PlayerId, team: Side) -> Self {
        Self {
            player_id,
            team,
            first_serves_in: 0,
            first_serves_total: 0,
            first_serve_won: 0,
            second_serves_in: 0,
            second_serves_total: 0,
            second_serve_won: 0,
            double_faults: 0,
            total_points_won: 0,
        }
    }

    /// First serve landed in.
    pub fn record_first_serve(&mut self, won: bool) {
        self.first_serves_total += 1;
        self.first_serves_in += 1;
        if won {
            self.first_serve_won += 1;
        }
    }

    /// First serve missed, second serve landed in.
    pub fn record_second_serve(&mut self, won: bool) {
        self.first_serves_total += 1;
        self.second_serves_total += 1;
        self.second_serves_in += 1;
        if won {
            self.second_serve_won += 1;
        }
    }

    pub fn record_double_fault(&mut self) {
        self.first_serves_total += 1;
        self.second_serves_total += 1;
        self.double_faults += 1;
    }

    pub fn add_point_won(&mut self) {
        self.total_points_won += 1;
    }
}
