use anyhow::bail;
use clap::Parser;
use snowgen::SnowflakeId;

/// Runtime configuration for the `snowgen-demo` binary.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first when present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowgen-demo",
    version,
    about = "Generate, load-test and encode Snowflake IDs"
)]
pub struct CliArgs {
    /// Datacenter this process generates IDs for (0-31).
    ///
    /// Environment variable: `DATACENTER_ID`
    #[arg(long, env = "DATACENTER_ID", default_value_t = 0, allow_negative_numbers = true)]
    pub datacenter_id: i64,

    /// Worker within the datacenter (0-31). Every running generator must use
    /// a distinct `(datacenter_id, worker_id)` pair.
    ///
    /// Environment variable: `WORKER_ID`
    #[arg(long, env = "WORKER_ID", default_value_t = 0, allow_negative_numbers = true)]
    pub worker_id: i64,

    /// Number of IDs printed with their generation time.
    ///
    /// Environment variable: `COUNT`
    #[arg(long, env = "COUNT", default_value_t = 5)]
    pub count: usize,

    /// Number of IDs generated concurrently by the load test. Zero skips it.
    ///
    /// Environment variable: `LOAD`
    #[arg(long, env = "LOAD", default_value_t = 200_000)]
    pub load: usize,

    /// Threads sharing the generator during the load test. Defaults to the
    /// number of logical CPUs.
    ///
    /// Environment variable: `THREADS`
    #[arg(long, env = "THREADS")]
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub datacenter_id: i64,
    pub worker_id: i64,
    pub count: usize,
    pub load: usize,
    pub threads: usize,
}

impl TryFrom<CliArgs> for DemoConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let max_datacenter_id = SnowflakeId::max_datacenter_id();
        let max_worker_id = SnowflakeId::max_worker_id();

        if !(0..=max_datacenter_id).contains(&args.datacenter_id) {
            bail!(
                "DATACENTER_ID ({}) must be between 0 and {}",
                args.datacenter_id,
                max_datacenter_id
            );
        }

        if !(0..=max_worker_id).contains(&args.worker_id) {
            bail!(
                "WORKER_ID ({}) must be between 0 and {}",
                args.worker_id,
                max_worker_id
            );
        }

        let threads = args.threads.unwrap_or_else(num_cpus::get);
        if threads == 0 {
            bail!("THREADS must be greater than 0");
        }

        Ok(Self {
            datacenter_id: args.datacenter_id,
            worker_id: args.worker_id,
            count: args.count,
            load: args.load,
            threads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<DemoConfig> {
        let args = CliArgs::try_parse_from(core::iter::once("snowgen-demo").chain(args.iter().copied()))?;
        DemoConfig::try_from(args)
    }

    #[test]
    fn explicit_values_are_kept() {
        let config = parse(&[
            "--datacenter-id",
            "31",
            "--worker-id",
            "7",
            "--count",
            "3",
            "--load",
            "10",
            "--threads",
            "2",
        ])
        .unwrap();
        assert_eq!(
            config,
            DemoConfig {
                datacenter_id: 31,
                worker_id: 7,
                count: 3,
                load: 10,
                threads: 2,
            }
        );
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        assert!(parse(&["--datacenter-id", "32", "--worker-id", "0"]).is_err());
        assert!(parse(&["--datacenter-id", "0", "--worker-id", "32"]).is_err());
        assert!(parse(&["--datacenter-id", "-1", "--worker-id", "0"]).is_err());
        assert!(parse(&["--datacenter-id", "0", "--worker-id", "-1"]).is_err());
    }

    #[test]
    fn zero_threads_is_rejected() {
        let err = parse(&["--datacenter-id", "1", "--worker-id", "1", "--threads", "0"]).unwrap_err();
        assert!(err.to_string().contains("THREADS"));
    }
}
