//! Collects summaries sent by simulation threads and writes them out once
//! every simulation has announced completion.

use crate::SimulationSummary;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::mpsc::Receiver;

/// Receives `(Some(summary), id)` messages from the simulation threads and a
/// final `(None, id)` sentinel per thread; once every id has signed off, the
/// accumulated summaries are formatted and written in id order.
pub fn write_summaries(
    receiver: Receiver<(Option<SimulationSummary>, usize)>,
    mut ids: HashSet<usize>,
    mut writer: impl Write,
) -> std::io::Result<()> {
    let mut summaries: HashMap<usize, SimulationSummary> = HashMap::new();
    loop {
        let Ok((message, id)) = receiver.recv() else {
            // Senders are gone; whatever arrived is all there is.
            break;
        };
        if let Some(summary) = message {
            if let Some(total) = summaries.get_mut(&id) {
                total.absorb(&summary);
            } else {
                summaries.insert(id, summary);
            }
        } else {
            ids.remove(&id);
            if ids.is_empty() {
                break;
            }
        }
    }

    let mut order: Vec<usize> = summaries.keys().copied().collect();
    order.sort_unstable();
    for id in order {
        writeln!(writer, "{:-^80}", format!("simulation #{id}"))?;
        write!(writer, "{}", summaries[&id])?;
        writeln!(writer, "{}", "-".repeat(80))?;
    }
    Ok(())
}
