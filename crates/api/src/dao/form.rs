use muzima_client::Form;

use super::FormDao;
use crate::error::Result;
use crate::index::QueryBuilder;

impl FormDao {
    /// Forms whose name contains `name`, ignoring case. Empty returns all.
    pub fn get_by_name(&self, name: &str) -> Result<Vec<Form>> {
        self.query(&QueryBuilder::new().contains("name", name).build())
    }
}
