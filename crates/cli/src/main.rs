use clap::{Parser, Subcommand};
use hl_core::{directory, IdentityIssuer, MedicalId, Specialty};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hlink")]
#[command(about = "Health-Link kiosk companion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the specialties health workers can register under
    Specialties,
    /// List symptom keywords with their questions and diagnosis text
    Symptoms {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a Medical ID and write its QR and ID files
    IssueId {
        /// Patient name used for the file names
        name: String,
        /// Directory to write the files into
        #[arg(long, default_value = hl_core::constants::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
    /// Check whether a value is a canonical Medical ID
    CheckId {
        /// Candidate Medical ID
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Specialties) => {
            for specialty in Specialty::all() {
                println!("{}. {}", specialty.code(), specialty.name());
            }
        }
        Some(Commands::Symptoms { json }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(directory::flows())?);
            } else {
                for flow in directory::flows() {
                    println!("{}:", flow.symptom);
                    for (n, question) in flow.questions.iter().enumerate() {
                        println!("  {}. {}", n + 1, question);
                    }
                    println!("  Diagnosis: {}", flow.diagnosis);
                }
            }
        }
        Some(Commands::IssueId { name, output_dir }) => {
            let id = MedicalId::new();
            match IdentityIssuer::new(output_dir).issue(&name, &id) {
                Ok(artifacts) => {
                    println!("Issued Medical ID: {}", id);
                    println!("QR code: {}", artifacts.qr_path.display());
                    println!("ID file: {}", artifacts.id_path.display());
                }
                Err(e) => eprintln!("Error issuing Medical ID: {}", e),
            }
        }
        Some(Commands::CheckId { id }) => match MedicalId::parse(&id) {
            Ok(id) => println!("Valid Medical ID: {}", id),
            Err(e) => eprintln!("{}", e),
        },
        None => {
            println!("Use 'hlink --help' for commands");
        }
    }

    Ok(())
}
