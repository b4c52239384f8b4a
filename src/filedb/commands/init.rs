use crate::commands::bootstrap;
use crate::error::Result;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &mut S) -> Result<()> {
    bootstrap(store)
}
