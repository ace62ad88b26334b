use crate::error::ConfigurationError;
use crate::schedule::{ScheduledGame, SeasonSchedule};
use crate::team::Team;
use chrono::{Duration, NaiveDate};
use itertools::Itertools;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_GAMES_PER_TEAM: u32 = 162;

/// Division games a team plays in total, split evenly across its rivals.
/// A sole rival is capped at half the budget (26 games).
const DIVISION_GAMES_BUDGET: f32 = 52.0;

/// Share of the non-division remainder that goes to same-league opponents;
/// the rest is interleague.
const SAME_LEAGUE_SHARE: f32 = 0.6;

/// Best-of-N restarts for the constrained series ordering.
const ORDERING_ATTEMPTS: usize = 50;

/// Gap beyond which a larger spacing earns no extra ordering score.
const GAP_BONUS_CAP: usize = 4;

const EXTRA_OFF_DAY_CHANCE: f64 = 0.10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleSettings {
    pub games_per_team: u32,
    pub start_date: NaiveDate,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        ScheduleSettings {
            games_per_team: DEFAULT_GAMES_PER_TEAM,
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchupKind {
    DivisionRival,
    SameLeague,
    Interleague,
    Unaligned,
}

#[derive(Debug)]
struct Matchup {
    a: u32,
    b: u32,
    kind: MatchupKind,
    total: u32,
    a_home: u32,
}

impl Matchup {
    fn b_home(&self) -> u32 {
        self.total - self.a_home
    }
}

#[derive(Debug, Clone)]
struct SeriesBlock {
    home_team_id: u32,
    away_team_id: u32,
    length: u32,
}

impl SeriesBlock {
    fn pair_key(&self) -> (u32, u32) {
        pair_key(self.home_team_id, self.away_team_id)
    }
}

fn pair_key(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

/// Builds a constraint-respecting season schedule for a set of teams.
///
/// The series ordering is a best-effort heuristic, not an exact solver:
/// residual back-to-back repeat pairings may remain for pathological league
/// shapes and are accepted as soft violations.
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    pub fn generate(
        teams: &[Team],
        settings: &ScheduleSettings,
    ) -> Result<SeasonSchedule, ConfigurationError> {
        Self::generate_with(teams, settings, &mut rand::rng())
    }

    pub fn generate_with(
        teams: &[Team],
        settings: &ScheduleSettings,
        rng: &mut impl Rng,
    ) -> Result<SeasonSchedule, ConfigurationError> {
        if teams.len() < 2 {
            return Err(ConfigurationError::NotEnoughTeams(teams.len()));
        }

        let mut matchups = Self::allocate_matchups(teams, settings.games_per_team);
        Self::split_home_away(&mut matchups, teams, rng);

        let series = Self::build_series(&matchups, rng);
        let (order, violations) = Self::order_series(&series, rng);

        if violations > 0 {
            warn!(
                "schedule ordering kept {} soft repeat-pairing violation(s)",
                violations
            );
        }

        let schedule = Self::assign_dates(teams, &series, &order, settings, rng);

        info!(
            "schedule generated: {} games, {:.1} per team, {} - {}",
            schedule.games.iter().filter(|g| !g.is_all_star_game).count(),
            schedule.games_per_team,
            schedule.start_date,
            schedule.end_date
        );

        Ok(schedule)
    }

    // ========== STEP 1: MATCHUP ALLOCATION ==========

    fn classify(a: &Team, b: &Team) -> MatchupKind {
        match (&a.league, &b.league) {
            (Some(la), Some(lb)) if la == lb => {
                if a.is_division_rival(b) {
                    MatchupKind::DivisionRival
                } else {
                    MatchupKind::SameLeague
                }
            }
            (Some(_), Some(_)) => MatchupKind::Interleague,
            _ => MatchupKind::Unaligned,
        }
    }

    /// Per-opponent game share as seen from one team.
    fn opponent_shares(team: &Team, teams: &[Team], games_per_team: u32) -> HashMap<u32, f32> {
        let opponents: Vec<&Team> = teams.iter().filter(|t| t.id != team.id).collect();
        let mut shares = HashMap::with_capacity(opponents.len());

        // No alignment metadata: even split across every opponent.
        if team.league.is_none() {
            let even = games_per_team as f32 / opponents.len() as f32;
            for opp in &opponents {
                shares.insert(opp.id, even);
            }
            return shares;
        }

        let rivals: Vec<&&Team> = opponents
            .iter()
            .filter(|o| Self::classify(team, o) == MatchupKind::DivisionRival)
            .collect();
        let league: Vec<&&Team> = opponents
            .iter()
            .filter(|o| Self::classify(team, o) == MatchupKind::SameLeague)
            .collect();
        let cross: Vec<&&Team> = opponents
            .iter()
            .filter(|o| {
                matches!(
                    Self::classify(team, o),
                    MatchupKind::Interleague | MatchupKind::Unaligned
                )
            })
            .collect();

        let mut rival_share = if rivals.is_empty() {
            0.0
        } else {
            DIVISION_GAMES_BUDGET / rivals.len().max(2) as f32
        };

        let division_total = rival_share * rivals.len() as f32;
        let remainder = (games_per_team as f32 - division_total).max(0.0);

        if league.is_empty() && cross.is_empty() {
            // Division rivals are the only opponents; they absorb everything.
            if !rivals.is_empty() {
                rival_share += remainder / rivals.len() as f32;
            }
        }

        let (league_pool, cross_pool) = match (league.is_empty(), cross.is_empty()) {
            (false, false) => (
                remainder * SAME_LEAGUE_SHARE,
                remainder * (1.0 - SAME_LEAGUE_SHARE),
            ),
            (false, true) => (remainder, 0.0),
            (true, false) => (0.0, remainder),
            (true, true) => (0.0, 0.0),
        };

        for opp in &rivals {
            shares.insert(opp.id, rival_share);
        }
        for opp in &league {
            shares.insert(opp.id, league_pool / league.len() as f32);
        }
        for opp in &cross {
            shares.insert(opp.id, cross_pool / cross.len() as f32);
        }

        shares
    }

    fn allocate_matchups(teams: &[Team], games_per_team: u32) -> Vec<Matchup> {
        let shares: HashMap<u32, HashMap<u32, f32>> = teams
            .iter()
            .map(|t| (t.id, Self::opponent_shares(t, teams, games_per_team)))
            .collect();

        let mut matchups = Vec::new();

        for (a, b) in teams.iter().tuple_combinations() {
            let from_a = shares[&a.id].get(&b.id).copied().unwrap_or(0.0);
            let from_b = shares[&b.id].get(&a.id).copied().unwrap_or(0.0);
            let total = ((from_a + from_b) / 2.0).round() as u32;

            if total == 0 {
                debug!("{} vs {}: allocation rounded to zero, skipped", a.name, b.name);
                continue;
            }

            matchups.push(Matchup {
                a: a.id,
                b: b.id,
                kind: Self::classify(a, b),
                total,
                a_home: 0,
            });
        }

        matchups
    }

    // ========== STEP 2: HOME/AWAY SPLIT ==========

    fn split_home_away(matchups: &mut [Matchup], teams: &[Team], rng: &mut impl Rng) {
        // home minus away games, per team
        let mut imbalance: HashMap<u32, i32> = teams.iter().map(|t| (t.id, 0)).collect();

        for m in matchups.iter_mut() {
            if m.total % 2 == 0 {
                m.a_home = m.total / 2;
                continue;
            }

            // The extra home game goes to whichever side is behind.
            let extra_to_a = match imbalance[&m.a].cmp(&imbalance[&m.b]) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Greater => false,
                std::cmp::Ordering::Equal => rng.random_bool(0.5),
            };

            if extra_to_a {
                m.a_home = m.total / 2 + 1;
                *imbalance.get_mut(&m.a).unwrap() += 1;
                *imbalance.get_mut(&m.b).unwrap() -= 1;
            } else {
                m.a_home = m.total / 2;
                *imbalance.get_mut(&m.a).unwrap() -= 1;
                *imbalance.get_mut(&m.b).unwrap() += 1;
            }
        }

        // Repair pass: flip extras until every team is within one game.
        for _ in 0..500 {
            let Some((&team_id, _)) = imbalance.iter().find(|(_, imb)| imb.abs() >= 2) else {
                break;
            };
            let too_many_home = imbalance[&team_id] >= 2;

            let candidate = matchups
                .iter_mut()
                .filter(|m| m.total % 2 == 1 && (m.a == team_id || m.b == team_id))
                .filter(|m| {
                    let holds_extra = (m.a == team_id) == (m.a_home > m.total / 2);
                    holds_extra == too_many_home
                })
                .min_by_key(|m| {
                    let partner = if m.a == team_id { m.b } else { m.a };
                    if too_many_home {
                        imbalance[&partner]
                    } else {
                        -imbalance[&partner]
                    }
                });

            let Some(m) = candidate else {
                break;
            };

            let partner = if m.a == team_id { m.b } else { m.a };
            m.a_home = m.total - m.a_home;

            let delta = if too_many_home { -2 } else { 2 };
            *imbalance.get_mut(&team_id).unwrap() += delta;
            *imbalance.get_mut(&partner).unwrap() -= delta;
        }
    }

    // ========== STEP 3: SERIES SEGMENTATION ==========

    fn series_length_range(kind: MatchupKind) -> (u32, u32) {
        // Division rivals play the longest series; interleague the shortest.
        match kind {
            MatchupKind::DivisionRival => (3, 4),
            MatchupKind::SameLeague => (2, 3),
            MatchupKind::Interleague | MatchupKind::Unaligned => (2, 3),
        }
    }

    fn build_series(matchups: &[Matchup], rng: &mut impl Rng) -> Vec<SeriesBlock> {
        let mut series = Vec::new();

        for m in matchups {
            let (min, max) = Self::series_length_range(m.kind);
            Self::chunk_series(m.a, m.b, m.a_home, min, max, rng, &mut series);
            Self::chunk_series(m.b, m.a, m.b_home(), min, max, rng, &mut series);
        }

        series
    }

    fn chunk_series(
        home_team_id: u32,
        away_team_id: u32,
        games: u32,
        min: u32,
        max: u32,
        rng: &mut impl Rng,
        out: &mut Vec<SeriesBlock>,
    ) {
        let mut remaining = games;
        while remaining > 0 {
            // The final partial series absorbs whatever is left.
            let length = rng.random_range(min..=max).min(remaining);
            out.push(SeriesBlock {
                home_team_id,
                away_team_id,
                length,
            });
            remaining -= length;
        }
    }

    // ========== STEP 4: CONSTRAINED ORDERING ==========

    fn order_series(series: &[SeriesBlock], rng: &mut impl Rng) -> (Vec<usize>, u32) {
        let mut best_order: Option<Vec<usize>> = None;
        let mut best_violations = u32::MAX;

        for attempt in 0..ORDERING_ATTEMPTS {
            let mut pool: Vec<usize> = (0..series.len()).collect();
            pool.shuffle(rng);

            let order = Self::greedy_pass(series, &pool, rng);
            let violations = Self::count_violations(series, &order);

            if violations < best_violations {
                best_violations = violations;
                best_order = Some(order);
            }

            if best_violations == 0 {
                debug!("zero-violation ordering found on attempt {}", attempt + 1);
                break;
            }
        }

        (best_order.unwrap_or_default(), best_violations)
    }

    fn greedy_pass(series: &[SeriesBlock], pool: &[usize], rng: &mut impl Rng) -> Vec<usize> {
        const FAR: usize = usize::MAX / 2;

        let mut remaining: Vec<usize> = pool.to_vec();
        let mut order = Vec::with_capacity(series.len());

        // global slot of the last series between a pairing
        let mut last_pair_slot: HashMap<(u32, u32), usize> = HashMap::new();
        // how many series each team has played so far
        let mut team_series: HashMap<u32, usize> = HashMap::new();
        // per (team, opponent): the team's own series index of their last meeting
        let mut last_meeting: HashMap<(u32, u32), usize> = HashMap::new();

        for slot in 0..series.len() {
            let mut best: Option<(f32, usize)> = None;
            let mut fallback: Option<(usize, usize)> = None;

            for (pos, &idx) in remaining.iter().enumerate() {
                let s = &series[idx];
                let home = s.home_team_id;
                let away = s.away_team_id;

                let pair_gap = last_pair_slot
                    .get(&s.pair_key())
                    .map_or(FAR, |&last| slot - last);
                let home_gap = last_meeting
                    .get(&(home, away))
                    .map_or(FAR, |&last| team_series.get(&home).copied().unwrap_or(0) - last);
                let away_gap = last_meeting
                    .get(&(away, home))
                    .map_or(FAR, |&last| team_series.get(&away).copied().unwrap_or(0) - last);

                let min_gap = pair_gap.min(home_gap).min(away_gap);
                if fallback.is_none_or(|(g, _)| min_gap > g) {
                    fallback = Some((min_gap, pos));
                }

                // Hard constraint: no repeat pairing in adjacent slots,
                // globally or in either team's own series sequence.
                if pair_gap <= 1 || home_gap <= 1 || away_gap <= 1 {
                    continue;
                }

                let score = pair_gap.min(GAP_BONUS_CAP)
                    + home_gap.min(GAP_BONUS_CAP)
                    + away_gap.min(GAP_BONUS_CAP);
                let score = score as f32 + rng.random::<f32>() * 0.5;

                if best.is_none_or(|(s, _)| score > s) {
                    best = Some((score, pos));
                }
            }

            // No feasible candidate: accept the least-bad soft violation.
            let pos = best
                .map(|(_, pos)| pos)
                .or(fallback.map(|(_, pos)| pos))
                .unwrap();

            let idx = remaining.swap_remove(pos);
            let s = &series[idx];
            order.push(idx);

            last_pair_slot.insert(s.pair_key(), slot);
            for (team, opp) in [
                (s.home_team_id, s.away_team_id),
                (s.away_team_id, s.home_team_id),
            ] {
                let count = team_series.entry(team).or_insert(0);
                last_meeting.insert((team, opp), *count);
                *count += 1;
            }
        }

        order
    }

    fn count_violations(series: &[SeriesBlock], order: &[usize]) -> u32 {
        let mut violations = 0;

        for window in order.windows(2) {
            if series[window[0]].pair_key() == series[window[1]].pair_key() {
                violations += 1;
            }
        }

        let mut last_opponent: HashMap<u32, u32> = HashMap::new();
        for &idx in order {
            let s = &series[idx];
            for (team, opp) in [
                (s.home_team_id, s.away_team_id),
                (s.away_team_id, s.home_team_id),
            ] {
                if last_opponent.get(&team) == Some(&opp) {
                    violations += 1;
                }
                last_opponent.insert(team, opp);
            }
        }

        violations
    }

    // ========== STEP 5: DATE ASSIGNMENT ==========

    fn assign_dates(
        teams: &[Team],
        series: &[SeriesBlock],
        order: &[usize],
        settings: &ScheduleSettings,
        rng: &mut impl Rng,
    ) -> SeasonSchedule {
        let total_games: u32 = order.iter().map(|&idx| series[idx].length).sum();
        let break_threshold = total_games / 4;

        let mut games: Vec<ScheduledGame> = Vec::with_capacity(total_games as usize + 1);
        let mut date = settings.start_date;
        let mut game_number = 1u32;
        let mut assigned = 0u32;
        let mut all_star_date: Option<NaiveDate> = None;

        for (series_seq, &idx) in order.iter().enumerate() {
            // The All-Star break lands on the first series boundary past the
            // threshold: off-day, exhibition, off-day.
            if all_star_date.is_none() && assigned > 0 && assigned >= break_threshold {
                date += Duration::days(1);
                games.push(ScheduledGame {
                    game_number,
                    home_team_id: teams[0].id,
                    away_team_id: teams[1].id,
                    date,
                    series_id: 0,
                    series_game: 1,
                    is_all_star_game: true,
                    result: None,
                });
                game_number += 1;
                all_star_date = Some(date);
                date += Duration::days(2);
            }

            let block = &series[idx];
            for game_in_series in 0..block.length {
                games.push(ScheduledGame {
                    game_number,
                    home_team_id: block.home_team_id,
                    away_team_id: block.away_team_id,
                    date,
                    series_id: series_seq as u32 + 1,
                    series_game: game_in_series as u8 + 1,
                    is_all_star_game: false,
                    result: None,
                });
                game_number += 1;
                assigned += 1;

                date += Duration::days(1);
                if game_in_series + 1 < block.length && rng.random_bool(EXTRA_OFF_DAY_CHANCE) {
                    date += Duration::days(1);
                }
            }

            // one off-day between series
            date += Duration::days(1);
        }

        let end_date = games.last().map_or(settings.start_date, |g| g.date);

        SeasonSchedule {
            games,
            start_date: settings.start_date,
            end_date,
            all_star_date,
            games_per_team: total_games as f32 * 2.0 / teams.len() as f32,
        }
    }
}
