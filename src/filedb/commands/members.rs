use crate::commands::bootstrap;
use crate::error::Result;
use crate::model::{record, Member, MemberStatus, Record, Table};
use crate::store::RecordStore;
use chrono::NaiveDate;
use tracing::info;

/// Append a new ACTIVE member who joined on `today` and return the id.
pub fn add<S: RecordStore>(
    store: &mut S,
    name: &str,
    email: &str,
    today: NaiveDate,
) -> Result<u64> {
    bootstrap(store)?;
    let id = store.next_id(Table::Members)?;
    let member = Member::new(id, name.into(), email.into(), today);
    store.append(Table::Members, &member.to_record())?;

    info!(id, name, "added member");
    Ok(id)
}

/// Returns `false` if there is no member with this id.
pub fn rename<S: RecordStore>(store: &mut S, id: u64, new_name: &str) -> Result<bool> {
    bootstrap(store)?;
    store.update_by_id(Table::Members, id, &record([("name", new_name)]))
}

/// Returns `false` if there is no member with this id.
pub fn set_status<S: RecordStore>(store: &mut S, id: u64, status: MemberStatus) -> Result<bool> {
    bootstrap(store)?;
    let updated = store.update_by_id(Table::Members, id, &record([("status", status.as_str())]))?;
    if updated {
        info!(id, %status, "member status changed");
    }
    Ok(updated)
}

pub fn list<S: RecordStore>(store: &mut S) -> Result<Vec<Record>> {
    bootstrap(store)?;
    store.read_all(Table::Members)
}
