use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "error" }));
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Round an interpolated count and format it with thousands separators.
pub fn format_count(value: f64) -> String {
    format_number(value.round().max(0.0) as u64)
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.bars == 0 {
        anyhow::bail!("--bars must be greater than 0");
    }

    if args.fps == 0 {
        anyhow::bail!("--fps must be greater than 0");
    }

    if args.duration == 0 {
        anyhow::bail!("--duration must be greater than 0");
    }

    if let Some(workers) = args.workers {
        if workers == 0 {
            anyhow::bail!("--workers must be greater than 0");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::args::Args;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(100_000), "100,000");
    }

    #[test]
    fn counts_round_to_nearest() {
        assert_eq!(format_count(1499.4), "1,499");
        assert_eq!(format_count(1499.5), "1,500");
        assert_eq!(format_count(-3.0), "0");
    }

    #[test]
    fn rejects_zero_arguments() {
        let ok = Args::parse_from(["racebar", "records.json"]);
        assert!(validate_args(&ok).is_ok());

        for flag in ["--bars", "--fps", "--duration", "--workers"] {
            let args = Args::parse_from(["racebar", "records.json", flag, "0"]);
            let err = validate_args(&args).unwrap_err();
            assert!(err.to_string().contains(flag), "{flag}: {err}");
        }
    }
}
