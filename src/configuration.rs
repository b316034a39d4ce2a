use chrono::NaiveTime;
use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn website_title(&self) -> String;
    fn frontend_path(&self) -> PathBuf;
    fn address(&self) -> String;
    fn port(&self) -> u16;
    fn days(&self) -> u32;
    fn slot_times(&self) -> Vec<NaiveTime>;
    fn provider_name(&self) -> String;
}
