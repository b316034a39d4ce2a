use crate::{configuration::Configuration, types::parse_time};
use chrono::NaiveTime;
use clap::Parser;
use std::path::PathBuf;

/// Single-provider slot booking service.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct ConfigurationHandler {
    /// Address to bind the HTTP server to
    #[arg(long, env = "BOOKING_ADDRESS", default_value = "0.0.0.0")]
    address: String,

    #[arg(short, long, env = "BOOKING_PORT", default_value_t = 3000)]
    port: u16,

    /// Number of upcoming days, starting today, that get slots
    #[arg(long, env = "BOOKING_DAYS", default_value_t = 7)]
    days: u32,

    /// Comma separated HH:MM start times offered on every day
    #[arg(
        long,
        env = "BOOKING_TIMES",
        value_delimiter = ',',
        value_parser = parse_time,
        default_values = ["10:00", "12:00", "14:00", "16:00", "18:00"]
    )]
    times: Vec<NaiveTime>,

    #[arg(long, env = "BOOKING_PROVIDER_NAME", default_value = "Марина")]
    provider_name: String,

    #[arg(long, env = "BOOKING_WEBSITE_TITLE", default_value = "Запись к мастеру")]
    website_title: String,

    #[arg(long, env = "BOOKING_FRONTEND_PATH", default_value = "frontend/index.html")]
    frontend_path: PathBuf,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn website_title(&self) -> String {
        self.website_title.clone()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn address(&self) -> String {
        self.address.clone()
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn days(&self) -> u32 {
        self.days
    }

    /// Configured times with repeats removed, first occurrence kept.
    fn slot_times(&self) -> Vec<NaiveTime> {
        let mut times = Vec::with_capacity(self.times.len());
        for &time in &self.times {
            if !times.contains(&time) {
                times.push(time);
            }
        }
        times
    }

    fn provider_name(&self) -> String {
        self.provider_name.clone()
    }
}
