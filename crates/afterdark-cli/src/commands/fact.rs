//! Age fact commands

use afterdark_gate::{AccessPolicy, AgeGate, FactBackend};
use afterdark_types::{AgeFact, VerificationMethod};
use chrono::{NaiveDate, Utc};
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::output::{print_single, print_success, print_warning, OutputFormat};

/// Verification method accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Document,
    Phone,
    Card,
}

impl From<MethodArg> for VerificationMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Document => VerificationMethod::Document,
            MethodArg::Phone => VerificationMethod::Phone,
            MethodArg::Card => VerificationMethod::Card,
        }
    }
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: NaiveDate,

    /// Verification method used
    #[arg(long, value_enum, default_value = "phone")]
    pub method: MethodArg,

    /// Record the birth date without marking it verified
    #[arg(long)]
    pub unverified: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    fact: &'a AgeFact,
    /// `None` when the birth date falls after `as_of`
    age: Option<u32>,
    as_of: NaiveDate,
}

pub fn status<B: FactBackend>(
    gate: &AgeGate<B>,
    as_of: NaiveDate,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let Some(fact) = gate.current_fact() else {
        print_warning("No age fact on record");
        return Ok(());
    };
    let age = AccessPolicy::new().user_age(Some(&fact), as_of);

    match format {
        OutputFormat::Table => {
            println!("Date of birth: {}", fact.birth_date);
            match age {
                Some(age) => println!("Age on {as_of}: {age}"),
                None => println!("Age on {as_of}: unknown (born after this date)"),
            }
            println!("Verified: {}", if fact.is_verified { "yes" } else { "no" });
            println!("Level: {}", fact.verification_level.as_str());
            if let Some(method) = fact.verification_method {
                println!("Method: {}", method.as_str());
            }
            if let Some(at) = fact.verified_at {
                println!("Verified at: {}", at.to_rfc3339());
            }
            Ok(())
        }
        _ => print_single(
            &StatusView {
                fact: &fact,
                age,
                as_of,
            },
            format,
        ),
    }
}

pub fn verify<B: FactBackend>(
    gate: &AgeGate<B>,
    args: VerifyArgs,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let fact = if args.unverified {
        AgeFact::declared(args.birth_date)
    } else {
        AgeFact::verified(args.birth_date, args.method.into(), Utc::now())
    };

    gate.verify_as_of(&fact, today)?;
    print_success(&format!(
        "Age fact recorded (age {}, {})",
        fact.age_on(today),
        if fact.is_verified { "verified" } else { "unverified" }
    ));
    Ok(())
}

pub fn forget<B: FactBackend>(gate: &AgeGate<B>) -> anyhow::Result<()> {
    gate.forget()?;
    print_success("Age fact removed");
    Ok(())
}
