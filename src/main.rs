use core::{
    BattingLine, Bullpen, Handedness, PitchingLine, PlayerSeasonStats, Position,
    ScheduleSettings, Season, Team,
};
use env_logger::Env;
use log::info;
use rand::seq::IndexedRandom;
use rand::{Rng, RngExt};

const FIRST_NAMES: &[&str] = &[
    "Alex", "Marcus", "Devon", "Rafael", "Kenji", "Tomas", "Jordan", "Luis", "Casey", "Dario",
    "Miguel", "Theo", "Andre", "Felix", "Ruben", "Sandy",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Brooks", "Castillo", "Daniels", "Edwards", "Fujita", "Gutierrez", "Hayes",
    "Ibanez", "Jensen", "Kimura", "Lopez", "Mercer", "Navarro", "Ortega", "Porter",
];

fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let teams = build_demo_league();

    info!("⚾ simulating a {}-team season", teams.len());

    let mut season = Season::new(teams, &ScheduleSettings::default())?;
    season.simulate_all();

    print_standings(&season);
    print_leaders(&season);

    Ok(())
}

fn print_standings(season: &Season) {
    let standings = season.standings();

    let mut current_division: Option<(Option<String>, Option<String>)> = None;
    for standing in &standings {
        let group = (standing.league.clone(), standing.division.clone());
        if current_division.as_ref() != Some(&group) {
            info!(
                "--- {} / {} ---",
                standing.league.as_deref().unwrap_or("?"),
                standing.division.as_deref().unwrap_or("?")
            );
            current_division = Some(group);
        }

        info!(
            "{:<18} {:>3}-{:<3} {:.3}  GB {:>4.1}  RS {:>3} RA {:>3}",
            standing.team_name,
            standing.wins,
            standing.losses,
            standing.win_pct(),
            standing.games_back,
            standing.runs_scored,
            standing.runs_allowed,
        );
    }
}

fn print_leaders(season: &Season) {
    let min_at_bats = (season.schedule.games_per_team * 2.0) as u32;
    let mut batters: Vec<_> = season
        .stats
        .players()
        .filter(|p| p.batting.at_bats >= min_at_bats)
        .collect();
    batters.sort_by(|a, b| {
        b.batting
            .avg()
            .partial_cmp(&a.batting.avg())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!("--- batting leaders ---");
    for player in batters.iter().take(5) {
        let name = player_name(season, player.player_id);
        info!(
            "{:<22} AVG {:.3}  HR {:>2}  RBI {:>3}",
            name,
            player.batting.avg(),
            player.batting.home_runs,
            player.rbi
        );
    }

    let min_outs = (season.schedule.games_per_team * 3.0) as u32;
    let mut pitchers: Vec<_> = season
        .stats
        .players()
        .filter(|p| p.pitching.outs_recorded >= min_outs)
        .collect();
    pitchers.sort_by(|a, b| {
        a.pitching
            .era()
            .partial_cmp(&b.pitching.era())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!("--- pitching leaders ---");
    for player in pitchers.iter().take(5) {
        let name = player_name(season, player.player_id);
        info!(
            "{:<22} ERA {:.2}  W-L {}-{}  K {:>3}",
            name,
            player.pitching.era(),
            player.wins,
            player.losses,
            player.pitching.strikeouts
        );
    }
}

fn player_name(season: &Season, player_id: u32) -> String {
    season
        .teams
        .iter()
        .find_map(|t| t.player(player_id))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{}", player_id))
}

// ========== DEMO LEAGUE ==========

fn build_demo_league() -> Vec<Team> {
    let league_layout = [
        ("Eastern League", "North", ["Harbor Cats", "Ridge Foxes", "Delta Kings"]),
        ("Eastern League", "South", ["Bayside Pilots", "Iron Herons", "Copper Owls"]),
        ("Western League", "North", ["Summit Bears", "Canyon Wolves", "Mesa Rattlers"]),
        ("Western League", "South", ["Dune Hawks", "River Hogs", "Prairie Larks"]),
    ];

    let mut rng = rand::rng();
    let mut teams = Vec::new();
    let mut next_team_id = 1u32;
    let mut next_player_id = 1u32;

    for (league, division, names) in league_layout {
        for name in names {
            teams.push(build_team(
                next_team_id,
                name,
                league,
                division,
                &mut next_player_id,
                &mut rng,
            ));
            next_team_id += 1;
        }
    }

    teams
}

fn build_team(
    id: u32,
    name: &str,
    league: &str,
    division: &str,
    next_player_id: &mut u32,
    rng: &mut impl Rng,
) -> Team {
    let mut team = Team::new(
        id,
        name.to_string(),
        Some(league.to_string()),
        Some(division.to_string()),
    );

    let field_positions = [
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
        Position::DesignatedHitter,
    ];

    for (slot, position) in field_positions.iter().enumerate() {
        let player = random_batter(*next_player_id, *position, rng);
        *next_player_id += 1;
        team.lineup_vs_right.slots[slot].player_id = Some(player.id);
        team.lineup_vs_left.slots[slot].player_id = Some(player.id);
        team.roster.push(player);
    }

    for slot in 0..team.rotation.len() {
        let player = random_pitcher(*next_player_id, Position::StartingPitcher, rng);
        *next_player_id += 1;
        team.rotation[slot] = Some(player.id);
        team.roster.push(player);
    }

    let closer = random_pitcher(*next_player_id, Position::ReliefPitcher, rng);
    *next_player_id += 1;
    let setup = random_pitcher(*next_player_id, Position::ReliefPitcher, rng);
    *next_player_id += 1;
    team.bullpen = Bullpen {
        closer: Some(closer.id),
        setup: vec![setup.id],
    };
    team.roster.push(closer);
    team.roster.push(setup);

    team
}

fn random_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Pat");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    format!("{} {}", first, last)
}

fn random_handedness(rng: &mut impl Rng) -> Handedness {
    match rng.random_range(0..10) {
        0..=5 => Handedness::Right,
        6..=8 => Handedness::Left,
        _ => Handedness::Switch,
    }
}

fn random_batter(id: u32, position: Position, rng: &mut impl Rng) -> PlayerSeasonStats {
    let at_bats = rng.random_range(420..=600);
    let avg: f32 = rng.random_range(0.230..=0.310);
    let hits = (at_bats as f32 * avg) as u32;
    let home_runs = rng.random_range(4..=38).min(hits);
    let doubles = rng.random_range(15..=40).min(hits - home_runs);

    PlayerSeasonStats {
        id,
        name: random_name(rng),
        position,
        bats: random_handedness(rng),
        throws: Handedness::Right,
        batting: BattingLine {
            at_bats,
            hits,
            doubles,
            triples: rng.random_range(0..=6),
            home_runs,
            walks: rng.random_range(25..=90),
            strikeouts: rng.random_range(60..=180),
        },
        pitching: None,
    }
}

fn random_pitcher(id: u32, position: Position, rng: &mut impl Rng) -> PlayerSeasonStats {
    let outs_recorded = match position {
        Position::StartingPitcher => rng.random_range(420..=600),
        _ => rng.random_range(150..=220),
    };
    let innings = outs_recorded as f32 / 3.0;
    let era: f32 = rng.random_range(2.80..=5.20);
    let earned_runs = (era * innings / 9.0) as u32;

    PlayerSeasonStats {
        id,
        name: random_name(rng),
        position,
        bats: Handedness::Right,
        throws: if rng.random_bool(0.3) {
            Handedness::Left
        } else {
            Handedness::Right
        },
        batting: BattingLine::default(),
        pitching: Some(PitchingLine {
            outs_recorded,
            earned_runs,
            strikeouts: rng.random_range((innings * 6.0) as u32..=(innings * 11.0) as u32),
            walks: rng.random_range((innings * 1.5) as u32..=(innings * 4.0) as u32),
            hits_allowed: rng.random_range((innings * 7.0) as u32..=(innings * 10.0) as u32),
        }),
    }
}
