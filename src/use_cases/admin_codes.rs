use chrono::NaiveDate;

use crate::domain::{CodeApi, CodePair};

// Admin/debug queries against the daily-code endpoints. Failures are logged and
// reported as empty results.
pub struct AdminCodesUseCase<A> {
    pub api: A,
}

impl<A> AdminCodesUseCase<A>
where
    A: CodeApi,
{
    pub async fn todays_code(&self) -> String {
        self.api.todays_code().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to fetch today's code.");
            String::new()
        })
    }

    pub async fn generate_codes(&self, start_date: NaiveDate, days: u32) -> Vec<CodePair> {
        self.api
            .generate_codes(start_date, days)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, %start_date, days, "failed to generate codes.");
                Vec::new()
            })
    }
}
