use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use wavecast_core::{
    AssignmentResult, Caster, DistinctModifiers, EventBus, GamePhase, RewardContext,
    RewardDecision, RewardFlow, RewardOffer, RngState, SpellBuilder, StatBaseline, WaveSummary,
    WithinManaBudget,
};
use wavecast_data::{load_catalog, load_reward_config};

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;
const DEFAULT_WAVES: u32 = 5;
const FRAME_SECS: f32 = 1.0 / 60.0;

#[derive(Debug, Clone)]
struct CliOptions {
    auto: bool,
    seed: Option<u64>,
    waves: u32,
    assets: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Accept,
    Skip,
    Quit,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut auto = false;
    let mut seed = None;
    let mut waves = DEFAULT_WAVES;
    let mut assets = PathBuf::from("assets");
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => auto = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--waves" | "-w" => {
                if let Some(value) = args.get(idx + 1) {
                    waves = value.parse::<u32>().unwrap_or(DEFAULT_WAVES);
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        auto,
        seed,
        waves,
        assets,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    if let Err(err) = run(&options, &mut input) {
        eprintln!("wavecast error: {err:#}");
        std::process::exit(1);
    }
}

/// Play `options.waves` waves and return how many were played. Reward
/// failures end only that wave's reward.
fn run(options: &CliOptions, input: &mut impl BufRead) -> anyhow::Result<u32> {
    let config = load_reward_config(&options.assets)?;
    let catalog = load_catalog(&options.assets);
    let policy = (WithinManaBudget, DistinctModifiers);
    let builder = SpellBuilder::new(&config, &policy);
    let mut rng = RngState::from_seed(options.seed.unwrap_or(DEFAULT_RUN_SEED));
    let mut caster = Caster::new(StatBaseline::default());
    let mut flow = RewardFlow::from_config(&config);
    let mut events = EventBus::default();
    info!(seed = rng.seed(), waves = options.waves, "starting run");

    let mut played = 0;
    for wave in 1..=options.waves {
        played += 1;
        let killed = rng.range_inclusive(wave * 3, wave * 5);
        let summary = WaveSummary::after_wave(wave, killed);
        flow.observe_phase(GamePhase::Wave, summary, &mut events);
        flow.observe_phase(GamePhase::WaveEnd, summary, &mut events);

        let mut offer: Option<RewardOffer> = None;
        while offer.is_none() && flow.is_pending() {
            let ctx = RewardContext {
                caster: Some(&caster),
                builder: &builder,
                catalog: &catalog,
                rng: &mut rng,
                events: &mut events,
            };
            match flow.tick(FRAME_SECS, ctx) {
                Ok(visible) => offer = visible.cloned(),
                Err(err) => {
                    warn!(wave, "no reward this wave: {}", err);
                    println!("no reward this wave: {}", err);
                    break;
                }
            }
        }
        let Some(offer) = offer else {
            drain_events(&mut events);
            continue;
        };
        print_offer(&offer);

        let choice = if options.auto {
            Choice::Accept
        } else {
            prompt_choice(input)?
        };
        let decision = match choice {
            Choice::Accept => flow.accept(Some(&mut caster), &mut events),
            Choice::Skip => flow.skip(&mut events),
            Choice::Quit => break,
        };
        match decision {
            Ok(decision) => print_decision(decision),
            Err(err) => {
                warn!(wave, "reward not applied: {}", err);
                println!("reward not applied: {}", err);
            }
        }
        drain_events(&mut events);
        print_inventory(&caster);

        caster.baseline.damage_scale *= 1.05;
        caster.baseline.mana_pool += 5.0;
    }
    Ok(played)
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        debug!(?event, "reward event");
    }
}

fn print_offer(offer: &RewardOffer) {
    let (damage, mana) = offer.stats.rounded();
    println!();
    println!("== {} ==", offer.title);
    println!("Current Wave: {}", offer.summary.completed_wave);
    println!("Next Wave: {}", offer.summary.next_wave);
    println!("Enemies Killed: {}", offer.summary.enemies_killed);
    println!(
        "Reward: {} (icon {})",
        offer.spell.display_name(),
        offer.spell.icon_index()
    );
    for line in &offer.description {
        println!("  {}", line);
    }
    println!("Damage: {}  Mana: {}", damage, mana);
}

fn prompt_choice(input: &mut impl BufRead) -> anyhow::Result<Choice> {
    loop {
        print!("[a]ccept / [s]kip / [q]uit > ");
        io::stdout().flush().context("flush stdout")?;
        let mut line = String::new();
        if input.read_line(&mut line).context("read choice")? == 0 {
            return Ok(Choice::Quit);
        }
        match line.trim() {
            "a" | "accept" => return Ok(Choice::Accept),
            "s" | "skip" | "n" | "next" => return Ok(Choice::Skip),
            "q" | "quit" | "exit" => return Ok(Choice::Quit),
            other => println!("unknown choice: {}", other),
        }
    }
}

fn print_decision(decision: RewardDecision) {
    match decision {
        RewardDecision::Assigned(AssignmentResult::Inserted(slot)) => {
            println!("added to slot {}", slot)
        }
        RewardDecision::Assigned(AssignmentResult::Duplicate(slot)) => {
            println!("already known in slot {}, skipping add", slot)
        }
        RewardDecision::Assigned(AssignmentResult::Full) => {
            println!("all spell slots full; reward discarded")
        }
        RewardDecision::Skipped => println!("reward skipped"),
    }
}

fn print_inventory(caster: &Caster) {
    let inventory = &caster.inventory;
    println!(
        "Spells {}/{}{}",
        inventory.occupied(),
        inventory.capacity(),
        if inventory.is_full() { " (full)" } else { "" }
    );
    for (slot, spell) in inventory.slots().iter().enumerate() {
        match spell {
            Some(spell) => println!("  [{}] {}", slot, spell.display_name()),
            None => println!("  [{}] -", slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let options = parse_cli_options(&args(&[
            "--auto", "--seed", "9", "--waves", "3", "--assets", "data",
        ]));
        assert!(options.auto);
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.waves, 3);
        assert_eq!(options.assets, PathBuf::from("data"));
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let options = parse_cli_options(&args(&["--seed", "x", "-w", "many"]));
        assert_eq!(options.seed, None);
        assert_eq!(options.waves, DEFAULT_WAVES);
        assert!(!options.auto);
    }

    fn write_assets(name: &str, reward: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "wavecast-cli-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("create assets dir");
        std::fs::write(dir.join("reward.json"), reward).expect("write reward.json");
        dir
    }

    fn auto_options(assets: PathBuf, waves: u32) -> CliOptions {
        CliOptions {
            auto: true,
            seed: Some(3),
            waves,
            assets,
        }
    }

    #[test]
    fn unaffordable_rewards_do_not_end_the_run() {
        let assets = write_assets(
            "unaffordable",
            r#"{
                "modifier_weights": [1],
                "base_spells": [{ "name": "Meteor", "damage": 80, "mana": 500 }]
            }"#,
        );
        let played = run(&auto_options(assets.clone(), 3), &mut io::empty()).expect("run");
        assert_eq!(played, 3);
        let _ = std::fs::remove_dir_all(assets);
    }

    #[test]
    fn auto_run_plays_every_wave_with_bundled_assets() {
        let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets");
        let played = run(&auto_options(assets, 4), &mut io::empty()).expect("run");
        assert_eq!(played, 4);
    }

    #[test]
    fn missing_reward_config_is_fatal() {
        let assets = PathBuf::from("definitely/not/here");
        assert!(run(&auto_options(assets, 1), &mut io::empty()).is_err());
    }

    #[test]
    fn prompt_reads_choices_and_eof_quits() {
        let mut input = io::Cursor::new(b"hmm\ns\n".to_vec());
        assert_eq!(prompt_choice(&mut input).expect("choice"), Choice::Skip);
        assert_eq!(prompt_choice(&mut input).expect("choice"), Choice::Quit);
    }
}
