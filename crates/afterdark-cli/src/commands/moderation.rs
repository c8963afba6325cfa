//! Content classification command

use afterdark_gate::{AgeGate, FactBackend};
use afterdark_types::ContentFlags;
use clap::Args;

use crate::output::{print_single, OutputFormat};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Content id; when given, a full moderation record is printed
    #[arg(long)]
    pub content_id: Option<String>,

    #[arg(long)]
    pub violence: bool,
    #[arg(long)]
    pub sexual_content: bool,
    #[arg(long)]
    pub nudity: bool,
    #[arg(long)]
    pub language: bool,
    #[arg(long)]
    pub drug_use: bool,
    #[arg(long)]
    pub gambling: bool,
    #[arg(long)]
    pub horror: bool,
    #[arg(long)]
    pub discrimination: bool,
}

impl ClassifyArgs {
    fn flags(&self) -> ContentFlags {
        ContentFlags {
            violence: self.violence,
            sexual_content: self.sexual_content,
            nudity: self.nudity,
            language: self.language,
            drug_use: self.drug_use,
            gambling: self.gambling,
            horror: self.horror,
            discrimination: self.discrimination,
        }
    }
}

pub fn classify<B: FactBackend>(
    gate: &AgeGate<B>,
    args: ClassifyArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let flags = args.flags();

    if let Some(content_id) = args.content_id {
        let record = gate.review(content_id, &flags);
        return print_single(&record, format);
    }

    let rating = gate.suggest(&flags);
    match format {
        OutputFormat::Table => {
            let raised: Vec<_> = flags.raised().iter().map(|f| f.as_str()).collect();
            println!("Suggested rating: {}", rating);
            if !raised.is_empty() {
                println!("Flags: {}", raised.join(", "));
            }
            Ok(())
        }
        _ => print_single(rating, format),
    }
}
