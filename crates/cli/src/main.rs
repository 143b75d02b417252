use clap::{Parser, Subcommand};
use patientor_core::{parse_new_entry, parse_new_patient, CoreConfig, Services};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patientor patient record CLI")]
struct Cli {
    /// Directory holding patients.json and diagnoses.json (defaults to the built-in seed)
    #[arg(long, global = true)]
    seed_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show the full record of one patient
    Show {
        /// Patient id
        id: String,
    },
    /// List diagnosis codes
    Diagnoses,
    /// Validate a new-patient JSON file
    CheckPatient {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Validate a new-entry JSON file
    CheckEntry {
        /// Path to the JSON file
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => {
            let services = load_services(cli.seed_dir)?;
            let patients = services.patients.list_non_sensitive()?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "ID: {}, Name: {}, Born: {}, Gender: {}, Occupation: {}",
                        patient.id,
                        patient.name,
                        patient.date_of_birth,
                        patient.gender,
                        patient.occupation
                    );
                }
            }
        }
        Some(Commands::Show { id }) => {
            let services = load_services(cli.seed_dir)?;
            match services.patients.get_patient(&id)?.into_iter().next() {
                Some(patient) => println!("{}", serde_json::to_string_pretty(&patient)?),
                None => return Err(format!("No patient found: {id}").into()),
            }
        }
        Some(Commands::Diagnoses) => {
            let services = load_services(cli.seed_dir)?;
            for diagnosis in services.diagnoses.list() {
                match diagnosis.latin {
                    Some(latin) => println!("{}: {} ({})", diagnosis.code, diagnosis.name, latin),
                    None => println!("{}: {}", diagnosis.code, diagnosis.name),
                }
            }
        }
        Some(Commands::CheckPatient { file }) => {
            let patient = parse_new_patient(&read_json(&file)?)?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        Some(Commands::CheckEntry { file }) => {
            let entry = parse_new_entry(&read_json(&file)?)?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        None => {
            println!("Use 'patientor --help' for commands");
        }
    }

    Ok(())
}

fn load_services(seed_dir: Option<PathBuf>) -> Result<Services, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(seed_dir, false)?;
    Ok(Services::from_config(Arc::new(cfg))?)
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
