//! Integration tests for team formation and validation.

use std::collections::HashSet;
use tennis_tournament_web::{
    generate_manual_teams, generate_random_teams, get_team_by_id, validate_teams, PlayerId, Team,
    TournamentError,
};
use uuid::Uuid;

fn players(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn pairings(teams: &[Team]) -> Vec<(PlayerId, PlayerId, u32)> {
    teams
        .iter()
        .map(|t| (t.player1_id, t.player2_id, t.team_number))
        .collect()
}

#[test]
fn random_teams_cover_every_player_once() {
    let ids = players(8);
    let teams = generate_random_teams(&ids, 42).unwrap();
    assert_eq!(teams.len(), 4);

    let numbers: Vec<u32> = teams.iter().map(|t| t.team_number).collect();
    assert_eq!(numbers, [1, 2, 3, 4]);

    let seen: HashSet<PlayerId> = teams
        .iter()
        .flat_map(|t| [t.player1_id, t.player2_id])
        .collect();
    assert_eq!(seen, ids.iter().copied().collect::<HashSet<_>>());
}

#[test]
fn random_teams_are_reproducible_from_the_seed() {
    let ids = players(10);
    let first = generate_random_teams(&ids, 7).unwrap();
    let second = generate_random_teams(&ids, 7).unwrap();
    assert_eq!(pairings(&first), pairings(&second));

    // Team ids are fresh each time.
    assert_ne!(first[0].id, second[0].id);
}

#[test]
fn random_teams_need_enough_players() {
    assert_eq!(
        generate_random_teams(&players(3), 1),
        Err(TournamentError::NotEnoughPlayers { count: 3 })
    );
    assert_eq!(
        generate_random_teams(&players(0), 1),
        Err(TournamentError::NotEnoughPlayers { count: 0 })
    );
}

#[test]
fn random_teams_need_even_player_count() {
    assert_eq!(
        generate_random_teams(&players(5), 1),
        Err(TournamentError::OddPlayerCount { count: 5 })
    );
}

#[test]
fn random_teams_reject_duplicate_player() {
    let mut ids = players(3);
    ids.push(ids[0]);
    // Same team or different teams, depending on the shuffle.
    assert!(matches!(
        generate_random_teams(&ids, 3),
        Err(TournamentError::SamePlayerTwice { .. } | TournamentError::PlayerInMultipleTeams(_))
    ));
}

#[test]
fn manual_teams_keep_the_given_order() {
    let ids = players(4);
    let teams = generate_manual_teams(&[(ids[0], ids[3]), (ids[1], ids[2])]).unwrap();
    assert_eq!(
        pairings(&teams),
        [(ids[0], ids[3], 1), (ids[1], ids[2], 2)]
    );
    assert!(validate_teams(&teams).is_ok());
}

#[test]
fn manual_teams_need_two_pairs() {
    let ids = players(2);
    assert_eq!(
        generate_manual_teams(&[(ids[0], ids[1])]),
        Err(TournamentError::NotEnoughTeams)
    );
}

#[test]
fn manual_teams_reject_bad_players() {
    let ids = players(4);
    assert_eq!(
        generate_manual_teams(&[(ids[0], ids[1]), (ids[2], ids[2])]),
        Err(TournamentError::SamePlayerTwice { team_number: 2 })
    );
    assert_eq!(
        generate_manual_teams(&[(Uuid::nil(), ids[1]), (ids[2], ids[3])]),
        Err(TournamentError::InvalidPlayerId { team_number: 1 })
    );
    assert_eq!(
        generate_manual_teams(&[(ids[0], ids[1]), (ids[1], ids[2])]),
        Err(TournamentError::PlayerInMultipleTeams(ids[1]))
    );
}

#[test]
fn validate_rejects_duplicate_and_nil_team_ids() {
    let ids = players(4);
    let mut teams = generate_manual_teams(&[(ids[0], ids[1]), (ids[2], ids[3])]).unwrap();
    teams[1].id = teams[0].id;
    assert_eq!(
        validate_teams(&teams),
        Err(TournamentError::DuplicateTeamId(teams[0].id))
    );

    teams[0].id = Uuid::nil();
    assert_eq!(validate_teams(&teams), Err(TournamentError::InvalidTeamId));
}

#[test]
fn validate_rejects_single_team() {
    let ids = players(2);
    let team = Team::new(ids[0], ids[1], 1);
    assert_eq!(validate_teams(&[team]), Err(TournamentError::NotEnoughTeams));
}

#[test]
fn lookup_team_by_id() {
    let ids = players(4);
    let teams = generate_manual_teams(&[(ids[0], ids[1]), (ids[2], ids[3])]).unwrap();
    assert_eq!(get_team_by_id(&teams, teams[1].id), Ok(&teams[1]));
    assert!(teams[1].has_player(ids[3]));

    let missing = Uuid::new_v4();
    assert_eq!(
        get_team_by_id(&teams, missing),
        Err(TournamentError::TeamNotFound(missing))
    );
}
