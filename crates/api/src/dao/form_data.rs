use muzima_client::FormData;

use super::FormDataDao;
use crate::error::Result;
use crate::index::QueryBuilder;

impl FormDataDao {
    /// Form data matching every non-empty filter exactly. An empty filter
    /// matches any value in that field.
    pub fn get_all_filtered(
        &self,
        patient_uuid: &str,
        user_uuid: &str,
        status: &str,
    ) -> Result<Vec<FormData>> {
        let query = QueryBuilder::new()
            .exact("patientUuid", patient_uuid)
            .exact("userUuid", user_uuid)
            .exact("status", status)
            .build();
        self.query(&query)
    }
}
