//! What the dashboard hands to its list and modal components.
use std::fmt;

use plates::Plate;

#[derive(Clone, Copy, Debug)]
pub struct DashboardView<'a> {
    pub plates: &'a [Plate],
    pub editing: Option<&'a Plate>,
    pub add_modal_open: bool,
    pub edit_modal_open: bool,
    pub stale: bool,
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.plates.is_empty() {
            writeln!(f, "No plates on the menu")?;
        }

        for plate in self.plates {
            let marker = match self.editing {
                Some(editing) if editing.id == plate.id => '*',
                _ => ' ',
            };
            let availability = if plate.available {
                "available"
            } else {
                "unavailable"
            };

            writeln!(
                f,
                "{marker}{:>4}  {:<24} R$ {:>8}  {availability}",
                plate.id, plate.name, plate.price
            )?;

            if !plate.description.is_empty() {
                writeln!(f, "       {}", plate.description)?;
            }
        }

        if self.stale {
            writeln!(f, "(list may be out of date, refresh to resync)")?;
        }

        Ok(())
    }
}
