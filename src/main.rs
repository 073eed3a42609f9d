use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::{error, info};

use dnsfilter::args::{Args, Command};
use dnsfilter::csvout::CsvProjector;
use dnsfilter::grep::RecordFilter;
use dnsfilter::labels::{self, AggregateOptions, LabelDepth};
use dnsfilter::record;
use dnsfilter::uniq::Deduplicator;
use dnsfilter::utils::{open_output, setup_logging, validate_args};

fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    match args.command {
        Command::Labels {
            input,
            output,
            labels: label_count,
            field,
            check,
        } => {
            let options = AggregateOptions {
                field,
                labels: LabelDepth::new(label_count)?,
                check,
            };
            let records = record::load_records(input.as_deref())?;
            let entries = labels::aggregate(&records, &options)?;

            let writer = open_output(output.as_deref())?;
            labels::write_report(&entries, writer).context("Failed to write label report")?;
        }
        Command::Grep {
            input,
            output,
            name,
            target,
            check,
            description,
            invert_match,
        } => {
            let filter = RecordFilter::new(
                name.as_deref(),
                target.as_deref(),
                check.as_deref(),
                description.as_deref(),
                invert_match,
            )?;
            let records = record::load_records(input.as_deref())?;
            let kept = filter.apply(records)?;

            record::write_records(&kept, open_output(output.as_deref())?)?;
            eprintln!("Matched {} records", kept.len());
        }
        Command::Csv {
            fields,
            output,
            inputs,
        } => {
            let mut projector = CsvProjector::new(open_output(output.as_deref())?, fields)?;
            for records in record::load_all(&inputs)? {
                projector.write(&records)?;
            }
            projector.finish()?;
        }
        Command::Uniq { inputs, output } => {
            let mut dedup = Deduplicator::new();
            for records in record::load_all(&inputs)? {
                dedup.extend(records)?;
            }
            let records = dedup.into_records();

            record::write_records(&records, open_output(output.as_deref())?)?;
            eprintln!("Wrote {} records", records.len());
        }
    }

    info!(
        action = "complete",
        component = "dnsfilter",
        duration_ms = start_time.elapsed().as_millis(),
        "Command completed"
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = validate_args(&args).and_then(|_| run(args)) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
