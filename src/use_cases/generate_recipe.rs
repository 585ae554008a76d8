use crate::domain::{Recipe, RecipeApi, RecipeError};
use crate::use_cases::recipe_normalizer::normalize;

// Recipe generation use case. Unlike code validation, failures propagate so
// callers can react to each one.
pub struct GenerateRecipeUseCase<A> {
    pub api: A,
}

impl<A> GenerateRecipeUseCase<A>
where
    A: RecipeApi,
{
    /// `Ok(None)` for a blank name (no request is made) or an empty body.
    #[tracing::instrument(name = "generate_recipe", skip(self))]
    pub async fn execute(&self, name: &str) -> Result<Option<Recipe>, RecipeError> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        let body = self.api.request_recipe(name).await.map_err(|err| {
            tracing::error!(error = %err, "recipe request failed.");
            err
        })?;

        Ok(normalize(&body)?)
    }
}
