use crate::domain::model::{Assignment, Roster, RosterEntry};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn exchange_name(&self) -> &str;
    fn entries(&self) -> Vec<RosterEntry>;
    fn output_path(&self) -> &str;
    fn ascii_art_path(&self) -> Option<&str>;
    fn max_tries(&self) -> usize;
    fn seed(&self) -> Option<u64>;
    fn dry_run(&self) -> bool;
}

pub trait Pipeline: Send + Sync {
    fn assemble(&self) -> Result<Roster>;
    fn draw(&self, roster: &Roster) -> Result<Assignment>;
    fn deliver(&self, assignment: &Assignment) -> Result<String>;
}
