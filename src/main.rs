//! polylogos CLI: multi-paradigm reasoning over natural-language text.

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use polylogos::context::ReasonContext;
use polylogos::paradigm::{
    Classical, Decision, Fuzzy, Modal, Paradigm, ParadigmKind, Probabilistic, Quantum, Solver,
    Temporal,
};
use polylogos::registry::EngineRegistry;

#[derive(Parser)]
#[command(name = "polylogos", version, about = "Multi-paradigm reasoning core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one reasoning call and print the result as JSON.
    Reason {
        /// Input text to reason over.
        text: String,

        /// Paradigm to use (classical, fuzzy, modal, temporal, probabilistic,
        /// quantum, decision, solver).
        #[arg(long, default_value = "classical")]
        paradigm: String,

        /// Structured context as a JSON object.
        #[arg(long)]
        context: Option<String>,

        /// RNG seed for the quantum engine's measurement collapse.
        #[arg(long)]
        seed: Option<u64>,

        /// Pretty-print the JSON result.
        #[arg(long)]
        pretty: bool,
    },

    /// Check whether premises support a conclusion under a paradigm's rules.
    Validate {
        /// Premise sentences.
        #[arg(long, required = true, num_args = 1..)]
        premise: Vec<String>,

        /// The conclusion to check.
        #[arg(long)]
        conclusion: String,

        /// Paradigm whose rule table to use.
        #[arg(long, default_value = "classical")]
        paradigm: String,
    },

    /// List the available paradigms.
    Paradigms,

    /// Show a paradigm's seed rules and operators.
    Rules {
        /// Paradigm to inspect.
        #[arg(long, default_value = "classical")]
        paradigm: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Reason {
            text,
            paradigm,
            context,
            seed,
            pretty,
        } => {
            let kind: ParadigmKind = paradigm.parse().into_diagnostic()?;
            let mut ctx: ReasonContext = match context {
                Some(raw) => serde_json::from_str(&raw).into_diagnostic()?,
                None => ReasonContext::new(),
            };
            if let Some(seed) = seed {
                ctx.seed = Some(seed);
            }

            let registry = EngineRegistry::with_defaults().into_diagnostic()?;
            let result = registry
                .reason_with(kind, &text, Some(&ctx))
                .into_diagnostic()?;

            let json = if pretty {
                serde_json::to_string_pretty(&result).into_diagnostic()?
            } else {
                serde_json::to_string(&result).into_diagnostic()?
            };
            println!("{json}");
        }

        Commands::Validate {
            premise,
            conclusion,
            paradigm,
        } => {
            let kind: ParadigmKind = paradigm.parse().into_diagnostic()?;
            let registry = EngineRegistry::with_defaults().into_diagnostic()?;
            let engine = registry.get(kind).into_diagnostic()?;
            let premises: Vec<&str> = premise.iter().map(String::as_str).collect();
            let supported = engine
                .validate_argument(&premises, &conclusion)
                .into_diagnostic()?;
            println!("{supported}");
        }

        Commands::Paradigms => {
            for kind in ParadigmKind::ALL {
                println!("{kind}");
            }
        }

        Commands::Rules { paradigm } => {
            let kind: ParadigmKind = paradigm.parse().into_diagnostic()?;
            let (rules, operators) = seed_tables(kind);
            let tables = serde_json::json!({
                "paradigm": kind.name(),
                "rules": rules,
                "operators": operators,
            });
            println!("{}", serde_json::to_string_pretty(&tables).into_diagnostic()?);
        }
    }

    Ok(())
}

/// Seed tables for display, without building an engine.
fn seed_tables(
    kind: ParadigmKind,
) -> (Vec<polylogos::rule::Rule>, Vec<polylogos::operator::Operator>) {
    fn tables<P: Paradigm>(p: P) -> (Vec<polylogos::rule::Rule>, Vec<polylogos::operator::Operator>) {
        (p.rules(), p.operators())
    }
    match kind {
        ParadigmKind::Classical => tables(Classical::new()),
        ParadigmKind::Fuzzy => tables(Fuzzy::new()),
        ParadigmKind::Modal => tables(Modal::new()),
        ParadigmKind::Temporal => tables(Temporal::new()),
        ParadigmKind::Probabilistic => tables(Probabilistic::new()),
        ParadigmKind::Quantum => tables(Quantum::new()),
        ParadigmKind::Decision => tables(Decision::new()),
        ParadigmKind::Solver => tables(Solver::new()),
    }
}
