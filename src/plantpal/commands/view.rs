use crate::commands::helpers::require_plant;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::PlantId;
use crate::store::{RecordStore, SnapshotBackend};

pub fn run<B: SnapshotBackend>(store: &RecordStore<B>, id: PlantId) -> Result<CmdResult> {
    let plant = require_plant(store, id)?.clone();
    Ok(CmdResult::default().with_listed_plants(vec![plant]))
}
