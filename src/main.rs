//! Flappy Director CLI
//!
//! Prints a seeded pipe sequence as JSON lines so generated runs can be
//! inspected and diffed outside the browser.
//!
//! # Usage
//!
//! ```bash
//! flappy-director --difficulty souls --seed 42 --pipes 80
//! flappy-director --difficulty hard --dump-profile
//! RUST_LOG=debug flappy-director --near-miss-every 5
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result};
    use clap::Parser;
    use serde_json::json;

    use flappy_director::{Difficulty, PipeDirector, Settings};

    #[derive(Parser)]
    #[command(name = "flappy-director")]
    #[command(author, version, about = "Seeded pipe sequences for Flappy Director")]
    struct Args {
        /// Difficulty (easy, normal, hard, souls)
        #[arg(long, short = 'd', default_value = "normal")]
        difficulty: String,

        /// Run seed (random when omitted)
        #[arg(long, short = 's')]
        seed: Option<u64>,

        /// Number of pipes to generate
        #[arg(long, short = 'n', default_value = "40")]
        pipes: u32,

        /// Count every Nth pass as a near miss
        #[arg(long)]
        near_miss_every: Option<u32>,

        /// Print the difficulty profile as JSON and exit
        #[arg(long)]
        dump_profile: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

        let args = Args::parse();
        let difficulty = Difficulty::from_str(&args.difficulty)
            .with_context(|| format!("unknown difficulty: {}", args.difficulty))?;

        if args.dump_profile {
            println!("{}", serde_json::to_string_pretty(difficulty.profile())?);
            return Ok(());
        }

        let settings = Settings {
            difficulty,
            seed: args.seed,
        };
        let seed = settings.run_seed();
        log::info!("Generating {} pipes on {} (seed {})", args.pipes, difficulty.as_str(), seed);

        let mut director = PipeDirector::new(difficulty.profile(), difficulty.config(), seed);
        println!("{}", json!({ "seed": seed, "difficulty": difficulty }));

        for pipe in 1..=args.pipes {
            let intent = director.next()?;
            for event in director.drain_events() {
                println!("{}", serde_json::to_string(&event)?);
            }
            println!("{}", json!({ "pipe": pipe, "intent": intent }));

            // The bird always makes it; every Nth pass is a close call
            let near_miss = args.near_miss_every.is_some_and(|n| n > 0 && pipe % n == 0);
            if near_miss {
                director.progression_mut().record_near_miss();
            } else {
                director.progression_mut().record_clean_pass();
            }
            for event in director.on_score(pipe) {
                println!("{}", serde_json::to_string(&event)?);
            }
        }

        let longest = director.progression_mut().finish_run();
        log::info!("Longest clean streak: {}", longest);
        println!("{}", serde_json::to_string(&director.snapshot())?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `platform::web::start`
}
