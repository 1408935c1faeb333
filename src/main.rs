use anyhow::Result;
use clap::Parser;
use modus::analysis::{analyze_functionally, analyze_modal_characteristics};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Chord symbols, e.g. C Am F G7
    #[clap(required = true)]
    chords: Vec<String>,

    /// Parent key, e.g. "C major" or "Am"; inferred when omitted
    #[clap(short, long)]
    key: Option<String>,

    /// Run the modal analyzer instead of the functional pipeline
    #[clap(short, long)]
    modal: bool,

    /// Emit the result as YAML
    #[clap(short, long)]
    yaml: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let symbols: Vec<&str> = args.chords.iter().map(|s| s.as_str()).collect();
    let key = args.key.as_deref();

    if args.modal {
        let result = analyze_modal_characteristics(&symbols, key)?;
        if args.yaml {
            print!("{}", serde_yaml::to_string(&result)?);
        } else {
            println!("{} {}", result.tonic, result.mode);
            println!("{}", result.numerals.join(" - "));
            println!("confidence: {}", result.confidence);
            for line in &result.evidence {
                println!("  {}", line);
            }
        }
    } else {
        let result = analyze_functionally(&symbols, key)?;
        if args.yaml {
            print!("{}", serde_yaml::to_string(&result)?);
        } else {
            println!("{}", result.explanation);
            println!("confidence: {}", result.confidence);
            println!("progression: {}", result.progression_type);
        }
    }

    Ok(())
}
