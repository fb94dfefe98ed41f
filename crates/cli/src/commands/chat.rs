//! `atlas chat` — interactive domain menu + chat loop, or one-shot mode.

use std::io::{BufRead, Write};
use std::sync::Arc;

use atlas_completion::HttpCompletionClient;
use atlas_config::AppConfig;
use atlas_core::Domain;
use atlas_knowledge::GroundingSet;
use atlas_session::{Orchestrator, SubmitOutcome};

pub async fn run(
    question: Option<String>,
    domain: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    // Check for API key early — give a clear error
    if config.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set the environment variable:");
        eprintln!("    export ATLAS_API_KEY='pplx-...'");
        eprintln!();
        eprintln!("  Or add `api_key = \"...\"` to atlas.toml in the working directory.");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let client = Arc::new(HttpCompletionClient::from_config(&config)?);
    let groundings = Arc::new(GroundingSet::embedded()?);
    let mut orchestrator = Orchestrator::new(groundings, client, config.model.as_str());

    if let Some(question) = question {
        // One-shot mode
        let domain = domain
            .as_deref()
            .and_then(Domain::parse)
            .unwrap_or(Domain::WorkingTime);
        orchestrator.select(domain);

        eprint!("  ...");
        let outcome = orchestrator.submit(&question).await;
        eprint!("\r     \r");

        match outcome {
            SubmitOutcome::Answered(answer) | SubmitOutcome::Failed(answer) => {
                println!("{answer}");
            }
            SubmitOutcome::Rejected(reason) => {
                eprintln!("  [Rejeté] {reason:?}");
            }
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Atlas — assistant des agents ({})", config.model);
    println!("  Choisissez un domaine, posez vos questions.");
    println!("  '/back' pour revenir au menu, 'exit' pour quitter.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        print!("  Domaine > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("exit") {
            break;
        }
        let Some(domain) = Domain::parse(choice) else {
            println!("  Choix non reconnu.");
            continue;
        };

        orchestrator.select(domain);
        if let Some(session) = orchestrator.session() {
            let greeting = &session.transcript().messages()[0].content;
            println!();
            println!("  [{}]", domain.title());
            println!("  Assistant > {greeting}");
        }

        // Chat loop for the selected domain
        loop {
            println!();
            print!("  Vous > ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next() else { return Ok(()) };
            let input = line?;
            let input = input.trim();

            if input.eq_ignore_ascii_case("exit") {
                return Ok(());
            }
            if input == "/back" {
                orchestrator.back();
                break;
            }

            eprint!("  ...");
            let outcome = orchestrator.submit(input).await;
            eprint!("\r     \r");

            match outcome {
                SubmitOutcome::Answered(text) | SubmitOutcome::Failed(text) => {
                    for line in text.lines() {
                        println!("  Assistant > {line}");
                    }
                }
                SubmitOutcome::Rejected(_) => {}
            }
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    for (i, domain) in Domain::ALL.iter().enumerate() {
        println!("  {}. {} — {}", i + 1, domain.title(), domain.tagline());
    }
}
