//! Shopping-list CSV export.

use crate::models::ConsolidatedIngredient;

/// Render the consolidated shopping list as CSV.
///
/// Columns: `Ingredient, Grams, Pounds, Kilograms, Category`, masses to two
/// decimal places. Ingredient names routinely contain commas ("Carrots,
/// diced"); the writer quotes them.
///
/// # Errors
///
/// Returns `csv::Error` if a record fails to serialize (practically
/// unreachable for in-memory writes).
pub fn shopping_list_csv(
    ingredients: &[ConsolidatedIngredient],
) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Ingredient", "Grams", "Pounds", "Kilograms", "Category"])?;

    for ingredient in ingredients {
        writer.write_record([
            ingredient.ingredient_name.as_str(),
            &format!("{:.2}", ingredient.total_grams),
            &format!("{:.2}", ingredient.pounds),
            &format!("{:.2}", ingredient.kilograms),
            ingredient.category.label(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
