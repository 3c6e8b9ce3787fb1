//! Floor / table browser
//!
//! Floors are fetched once; tables are re-fetched whenever the selected
//! floor changes and filtered client-side. Clicking a table opens the
//! customer-name dialog, which in turn opens an order through
//! [`OrderWorkflow::create_order`].

use shared::models::{DiningTable, Floor, TableStatus};

use crate::api::RestoApi;
use crate::client::HttpClient;
use crate::route::Route;
use crate::workflow::OrderWorkflow;
use crate::{ClientError, ClientResult};

/// Floor picked when the list contains it
pub const PREFERRED_FLOOR_ID: i64 = 1;

/// Card color for a table status. Unknown statuses get a neutral white.
pub fn status_color(status: &TableStatus) -> &'static str {
    match status {
        TableStatus::Available => "#c8e6c9",
        TableStatus::Occupied => "#ffcdd2",
        TableStatus::Reserved => "#fff9c4",
        TableStatus::Inactive => "#e0e0e0",
        TableStatus::Other(_) => "#ffffff",
    }
}

/// Floor selected after loading: floor 1 if present, else the first floor.
pub fn default_floor(floors: &[Floor]) -> Option<String> {
    floors
        .iter()
        .find(|f| f.id == PREFERRED_FLOOR_ID)
        .or_else(|| floors.first())
        .map(|f| f.id.to_string())
}

/// Tables on `floor_id`, keeping the server's order.
pub fn tables_on_floor(tables: &[DiningTable], floor_id: i64) -> Vec<DiningTable> {
    tables
        .iter()
        .filter(|t| t.floor_id == floor_id)
        .cloned()
        .collect()
}

/// Per-status counts for the sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuickStats {
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub inactive: usize,
}

impl QuickStats {
    pub fn from_tables(tables: &[DiningTable]) -> Self {
        tables.iter().fold(Self::default(), |mut stats, t| {
            match t.status {
                TableStatus::Available => stats.available += 1,
                TableStatus::Occupied => stats.occupied += 1,
                TableStatus::Reserved => stats.reserved += 1,
                TableStatus::Inactive => stats.inactive += 1,
                TableStatus::Other(_) => {}
            }
            stats
        })
    }

    pub fn count(&self, status: &TableStatus) -> usize {
        match status {
            TableStatus::Available => self.available,
            TableStatus::Occupied => self.occupied,
            TableStatus::Reserved => self.reserved,
            TableStatus::Inactive => self.inactive,
            TableStatus::Other(_) => 0,
        }
    }
}

/// "Enter Customer Name" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDialog {
    pub table_id: i64,
    pub customer_name: String,
    submitting: bool,
}

impl CustomerDialog {
    pub fn new(table_id: i64) -> Self {
        Self {
            table_id,
            customer_name: String::new(),
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The Order button is enabled iff nothing is in flight and a name is set.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.customer_name.trim().is_empty()
    }
}

/// Dashboard state
#[derive(Debug, Clone, Default)]
pub struct TableBrowser {
    floors: Vec<Floor>,
    selected_floor: Option<String>,
    tables: Vec<DiningTable>,
    dialog: Option<CustomerDialog>,
}

impl TableBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn selected_floor(&self) -> Option<&str> {
        self.selected_floor.as_deref()
    }

    /// Tables of the selected floor.
    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn table(&self, table_id: i64) -> Option<&DiningTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn quick_stats(&self) -> QuickStats {
        QuickStats::from_tables(&self.tables)
    }

    pub fn dialog(&self) -> Option<&CustomerDialog> {
        self.dialog.as_ref()
    }

    /// Fetch floors, pick the default one and load its tables.
    ///
    /// Nothing is replaced unless both fetches succeed.
    pub async fn load<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<()> {
        let floors = fetch_floors(api).await?;
        let selected = default_floor(&floors);
        let tables = match selected.as_deref() {
            Some(floor_id) => fetch_tables(api, floor_id).await?,
            None => Vec::new(),
        };
        self.floors = floors;
        self.selected_floor = selected;
        self.tables = tables;
        Ok(())
    }

    /// Fetch the floor list and apply the default-floor rule. Tables left
    /// over from another floor are dropped until the next refresh.
    pub async fn load_floors<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<()> {
        let floors = fetch_floors(api).await?;
        let selected = default_floor(&floors);
        if selected != self.selected_floor {
            self.tables.clear();
        }
        self.selected_floor = selected;
        self.floors = floors;
        Ok(())
    }

    /// Switch floors. Tables are only re-fetched when the selection changes,
    /// and the selection only moves once its tables are in.
    pub async fn select_floor<C: HttpClient>(
        &mut self,
        api: &RestoApi<C>,
        floor_id: impl Into<String>,
    ) -> ClientResult<()> {
        let floor_id = floor_id.into();
        if self.selected_floor.as_deref() == Some(floor_id.as_str()) {
            return Ok(());
        }
        let tables = fetch_tables(api, &floor_id).await?;
        self.selected_floor = Some(floor_id);
        self.tables = tables;
        Ok(())
    }

    /// Re-fetch all tables and keep those on the selected floor.
    /// Does nothing while no floor is selected.
    pub async fn refresh_tables<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<()> {
        let Some(selected) = self.selected_floor.as_deref() else {
            return Ok(());
        };
        self.tables = fetch_tables(api, selected).await?;
        Ok(())
    }

    /// Click on a table card. Inactive tables, and ids not on this floor, are
    /// a no-op; anything else opens the customer dialog. Returns whether it
    /// opened.
    pub fn click_table(&mut self, table_id: i64) -> bool {
        let interactive = self.table(table_id).is_some_and(DiningTable::is_interactive);
        if interactive {
            self.dialog = Some(CustomerDialog::new(table_id));
        }
        interactive
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        if let Some(dialog) = &mut self.dialog
            && !dialog.submitting
        {
            dialog.customer_name = name.into();
        }
    }

    /// Close the dialog. Ignored while a request is in flight.
    pub fn cancel_dialog(&mut self) {
        if self.dialog.as_ref().is_some_and(|d| !d.submitting) {
            self.dialog = None;
        }
    }

    /// Submit the customer dialog.
    ///
    /// On success the dialog closes and the item-entry route is returned; on
    /// failure the dialog stays open with its input intact.
    pub async fn submit_order<C: HttpClient>(
        &mut self,
        api: &RestoApi<C>,
        workflow: &mut OrderWorkflow,
    ) -> ClientResult<Route> {
        let dialog = self
            .dialog
            .as_ref()
            .ok_or_else(|| ClientError::Validation("No table selected".into()))?;
        if dialog.submitting {
            return Err(ClientError::Busy);
        }
        let table = self
            .table(dialog.table_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("table {}", dialog.table_id)))?;
        let customer_name = dialog.customer_name.clone();

        let mut guard = SubmitGuard::arm(&mut self.dialog);
        let result = workflow.create_order(api, &table, &customer_name).await;
        if result.is_ok() {
            guard.close();
        }
        result
    }
}

async fn fetch_floors<C: HttpClient>(api: &RestoApi<C>) -> ClientResult<Vec<Floor>> {
    api.floors().await.inspect_err(|e| {
        tracing::error!(error = %e, "Error fetching floors");
    })
}

/// All tables from the server, narrowed to `floor_id`.
async fn fetch_tables<C: HttpClient>(
    api: &RestoApi<C>,
    floor_id: &str,
) -> ClientResult<Vec<DiningTable>> {
    let id: i64 = floor_id
        .parse()
        .map_err(|_| ClientError::Validation(format!("invalid floor id: {floor_id}")))?;
    let all = api.tables().await.inspect_err(|e| {
        tracing::error!(floor_id = id, error = %e, "Error fetching tables");
    })?;
    Ok(tables_on_floor(&all, id))
}

/// Holds the dialog's `submitting` flag up for one request. The flag drops
/// again however the request ends, including a cancelled future.
struct SubmitGuard<'a>(&'a mut Option<CustomerDialog>);

impl<'a> SubmitGuard<'a> {
    fn arm(slot: &'a mut Option<CustomerDialog>) -> Self {
        if let Some(dialog) = slot.as_mut() {
            dialog.submitting = true;
        }
        Self(slot)
    }

    /// Order placed: the dialog goes away.
    fn close(&mut self) {
        *self.0 = None;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if let Some(dialog) = self.0.as_mut() {
            dialog.submitting = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(id: i64) -> Floor {
        Floor {
            id,
            name: format!("Floor {id}"),
        }
    }

    fn table(id: i64, floor_id: i64, status: &str) -> DiningTable {
        DiningTable {
            id,
            number: id.to_string(),
            status: TableStatus::from(status),
            floor_id,
        }
    }

    #[test]
    fn test_default_floor_prefers_floor_one() {
        assert_eq!(default_floor(&[floor(3), floor(1), floor(2)]).as_deref(), Some("1"));
        assert_eq!(default_floor(&[floor(4), floor(2)]).as_deref(), Some("4"));
        assert_eq!(default_floor(&[]), None);
    }

    #[test]
    fn test_tables_on_floor_keeps_order() {
        let all = vec![
            table(5, 2, "available"),
            table(1, 1, "available"),
            table(9, 2, "occupied"),
            table(2, 2, "inactive"),
        ];
        let ids: Vec<i64> = tables_on_floor(&all, 2).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 9, 2]);
        assert!(tables_on_floor(&all, 7).is_empty());
    }

    #[test]
    fn test_status_color() {
        assert_eq!(status_color(&TableStatus::from("Available")), "#c8e6c9");
        assert_eq!(status_color(&TableStatus::from("OCCUPIED")), "#ffcdd2");
        assert_eq!(status_color(&TableStatus::from("reserved")), "#fff9c4");
        assert_eq!(status_color(&TableStatus::from("inactive")), "#e0e0e0");
        assert_eq!(status_color(&TableStatus::from("cleaning")), "#ffffff");
    }

    #[test]
    fn test_click_inactive_table_is_noop() {
        let mut browser = TableBrowser {
            tables: vec![table(1, 1, "Inactive"), table(2, 1, "reserved")],
            ..TableBrowser::default()
        };
        assert!(!browser.click_table(1));
        assert!(browser.dialog().is_none());
        assert!(!browser.click_table(42));
        assert!(browser.dialog().is_none());

        assert!(browser.click_table(2));
        assert_eq!(browser.dialog().map(|d| d.table_id), Some(2));
    }

    #[test]
    fn test_dialog_submit_button() {
        let mut dialog = CustomerDialog::new(3);
        assert!(!dialog.can_submit());
        dialog.customer_name = "   ".into();
        assert!(!dialog.can_submit());
        dialog.customer_name = "Alice".into();
        assert!(dialog.can_submit());
        dialog.submitting = true;
        assert!(!dialog.can_submit());
    }

    #[test]
    fn test_submit_guard_releases_dialog() {
        let mut slot = Some(CustomerDialog::new(2));
        {
            let _guard = SubmitGuard::arm(&mut slot);
        }
        assert_eq!(slot.as_ref().map(CustomerDialog::is_submitting), Some(false));

        {
            let mut guard = SubmitGuard::arm(&mut slot);
            guard.close();
        }
        assert!(slot.is_none());
    }

    #[test]
    fn test_quick_stats() {
        let tables = vec![
            table(1, 1, "available"),
            table(2, 1, "Available"),
            table(3, 1, "occupied"),
            table(4, 1, "inactive"),
            table(5, 1, "cleaning"),
        ];
        let stats = QuickStats::from_tables(&tables);
        assert_eq!(
            stats,
            QuickStats {
                available: 2,
                occupied: 1,
                reserved: 0,
                inactive: 1
            }
        );
        assert_eq!(stats.count(&TableStatus::Available), 2);
    }
}
