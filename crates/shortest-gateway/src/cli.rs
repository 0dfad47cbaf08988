use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SHORTEST_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "SHORTEST_BASE_URL";
pub const FALLBACK_URL_ENV: &str = "SHORTEST_FALLBACK_URL";
pub const GENERATOR_ENV: &str = "SHORTEST_GENERATOR";
pub const CODE_SPACE_ENV: &str = "SHORTEST_CODE_SPACE";
pub const MAX_ATTEMPTS_ENV: &str = "SHORTEST_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "SHORTEST_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_BASE_URL: &str = "http://short.est";
pub const DEFAULT_FALLBACK_URL: &str = "http://short.est/404";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    #[value(name = "random")]
    Random,
    #[value(name = "seq")]
    Seq,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Random => write!(f, "random"),
            GeneratorArg::Seq => write!(f, "seq"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "shortest", about = "short.est URL shortener")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public base URL short codes are appended to.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where unknown short codes are redirected.
    #[arg(long, env = FALLBACK_URL_ENV, default_value = DEFAULT_FALLBACK_URL)]
    pub fallback_url: String,

    #[arg(
        long,
        env = GENERATOR_ENV,
        value_enum,
        default_value_t = GeneratorArg::Random
    )]
    pub generator: GeneratorArg,

    /// Exclusive upper bound of the random numbers codes are drawn from.
    #[arg(
        long,
        env = CODE_SPACE_ENV,
        default_value_t = shortest_generator::DEFAULT_UPPER_BOUND,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub code_space: u64,

    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = shortest_shortener::DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}
