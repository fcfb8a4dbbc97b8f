mod cli;
mod utils;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info};

use halz::{decode, encode, EncodeOptions};

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    debug!("{:?}", args.command);

    let result = match args.command {
        cli::Commands::Exhal { romfile, offset, outfile } => run_exhal(&romfile, &offset, &outfile),
        cli::Commands::Inhal {
            infile,
            romfile,
            offset,
            new,
            fast,
            optimal,
        } => run_inhal(&infile, romfile, offset, new, fast, optimal),
        cli::Commands::Sniff { romfile } => run_sniff(&romfile),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run_exhal(romfile: &std::path::Path, offset: &str, outfile: &std::path::Path) -> Result<(), String> {
    let offset = utils::parse_offset(offset)?;
    let packed = utils::read_at_offset(romfile, offset).map_err(|e| format!("unable to read {romfile:?}: {e}"))?;

    let (unpacked, stats) = decode(&packed).map_err(|e| format!("decode failed: {e}"))?;
    debug!("method use counts: {:?}", stats.method_use_counts);

    utils::write_new_file(outfile, &unpacked).map_err(|e| format!("unable to write {outfile:?}: {e}"))?;
    info!("Uncompressed size: {} bytes", unpacked.len());
    Ok(())
}

fn run_inhal(
    infile: &std::path::Path,
    romfile: Option<std::path::PathBuf>,
    offset: Option<String>,
    new: Option<std::path::PathBuf>,
    fast: bool,
    optimal: bool,
) -> Result<(), String> {
    if fast {
        info!("Fast compression enabled.");
    }

    let unpacked = utils::read_whole_file(infile).map_err(|e| format!("unable to read {infile:?}: {e}"))?;
    info!("Uncompressed size: {} bytes", unpacked.len());

    let options = EncodeOptions { fast, optimal };
    let start = Instant::now();
    let packed = encode(&unpacked, options).map_err(|e| format!("encode failed: {e}"))?;
    let elapsed = start.elapsed();

    info!("Compressed size: {} bytes", packed.len());
    if !unpacked.is_empty() {
        info!("Compression ratio: {:.2}%", 100.0 * packed.len() as f64 / unpacked.len() as f64);
    }
    info!("Compression time: {:.3} seconds", elapsed.as_secs_f64());

    match (romfile, offset, new) {
        (_, _, Some(outfile)) => {
            utils::write_new_file(&outfile, &packed).map_err(|e| format!("unable to write {outfile:?}: {e}"))?;
            info!("Wrote 0x{:06x} - 0x{:06x} to {outfile:?}", 0, packed.len().saturating_sub(1));
        }
        (Some(romfile), Some(offset_text), None) => {
            let offset = utils::parse_offset(&offset_text)?;
            utils::write_at_offset(&romfile, offset, &packed).map_err(|e| format!("unable to write {romfile:?}: {e}"))?;
            info!(
                "Inserted at 0x{:06x} - 0x{:06x}",
                offset,
                offset + packed.len().saturating_sub(1) as u64
            );
        }
        _ => return Err("either <romfile> <offset> or -n <outfile> must be given".to_string()),
    }

    Ok(())
}

fn run_sniff(romfile: &std::path::Path) -> Result<(), String> {
    let data = utils::read_whole_file_unbounded(romfile).map_err(|e| format!("unable to read {romfile:?}: {e}"))?;

    for offset in 0..data.len() {
        let window = utils::window_at_offset(&data, offset);
        let (unpacked, stats) = match decode(&window) {
            Ok(result) => result,
            Err(_) => continue,
        };

        if unpacked.len() > stats.bytes_consumed && unpacked.len() >= 1024 {
            let ranked: Vec<u8> = stats.method_table().iter().collect();
            println!(
                "{:06x}: {} -> {} bytes (methods by use, most-used first: {:?})",
                offset,
                stats.bytes_consumed,
                unpacked.len(),
                ranked
            );
        }
    }

    Ok(())
}
