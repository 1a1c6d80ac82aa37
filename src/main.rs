use clap::Parser;
use std::path::PathBuf;
use voiceclone::{clone_voice, logging, VoiceCloneRequest, VoiceLabels};

/// Create an instant voice clone from audio samples.
#[derive(Parser, Debug)]
#[command(
    name = "voiceclone",
    version,
    about = "Create an instant voice clone from audio samples"
)]
struct Cli {
    /// Name for the cloned voice
    #[arg(long, short = 'n')]
    name: String,

    /// Audio file(s) for cloning; relative paths resolve under the sample directory
    #[arg(long, short = 'f', num_args = 1.., required = true)]
    files: Vec<String>,

    /// Description of the voice
    #[arg(long, short = 'd')]
    description: Option<String>,

    /// Language label (e.g. "de", "en")
    #[arg(long, short = 'l')]
    language: Option<String>,

    /// Accent label (e.g. "german", "british")
    #[arg(long)]
    accent: Option<String>,

    /// Gender label ("male" or "female")
    #[arg(long, short = 'g')]
    gender: Option<String>,

    /// Age label (e.g. "young", "middle_aged", "old")
    #[arg(long)]
    age: Option<String>,

    /// Remove background noise from the samples
    #[arg(long)]
    denoise: bool,

    /// Directory containing the audio samples
    #[arg(long)]
    sample_dir: Option<PathBuf>,

    /// Print the raw JSON response
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let labels = VoiceLabels {
        language: cli.language,
        accent: cli.accent,
        gender: cli.gender,
        age: cli.age,
    };
    let request = VoiceCloneRequest {
        name: cli.name.clone(),
        files: cli.files,
        api_key: None,
        description: cli.description,
        labels: (!labels.is_empty()).then_some(labels),
        remove_background_noise: cli.denoise,
        sample_dir: cli.sample_dir,
    };

    let result = clone_voice(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("voice created: {}", result.voice_id);
        println!("  name: {}", cli.name);
        if result.requires_verification {
            println!("  warning: voice requires verification");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn label_flags_parse() {
        let cli = Cli::try_parse_from([
            "voiceclone",
            "--name",
            "Andi",
            "--files",
            "a.m4a",
            "b.m4a",
            "--language",
            "de",
            "--denoise",
        ])
        .unwrap();
        assert_eq!(cli.files, vec!["a.m4a", "b.m4a"]);
        assert_eq!(cli.language.as_deref(), Some("de"));
        assert!(cli.accent.is_none());
        assert!(cli.denoise);
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["voiceclone", "--name", "Andi"]).is_err());
    }
}
