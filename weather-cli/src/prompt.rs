//! Interactive city picker built on `inquire`.
//!
//! The text prompt feeds every keystroke to the core debouncer and shows the
//! most recent suggestions that still match what is typed. Submitting the
//! prompt either picks an exact match or opens a select list.
//!
//! `inquire` only asks for suggestions when the input changes, so a batch that
//! arrives after the quiet period shows up on the next keystroke. Pressing
//! enter waits for the pending lookup and lists its result.

use std::sync::Arc;

use anyhow::Result;
use cityweather_core::{City, SuggestionBatch, SuggestionDebouncer, suggest::is_searchable};
use inquire::{
    CustomUserError, InquireError, Select, Text,
    autocompletion::{Autocomplete, Replacement},
};
use tokio::runtime::Handle;

use crate::render;

#[derive(Clone)]
struct CityAutocomplete {
    debouncer: Arc<SuggestionDebouncer>,
    last_input: String,
}

impl Autocomplete for CityAutocomplete {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        if input != self.last_input {
            self.last_input = input.to_string();
            self.debouncer.submit(input);
        }

        Ok(hints_for(input, &self.debouncer.latest()))
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

/// Suggestions worth showing while `input` is typed.
///
/// The latest batch may belong to an earlier prefix; it is shown only while
/// the input still extends that prefix.
fn hints_for(input: &str, batch: &SuggestionBatch) -> Vec<String> {
    if !is_searchable(input) || batch.query.is_empty() {
        return Vec::new();
    }

    let typed = input.to_lowercase();
    if !typed.starts_with(&batch.query.to_lowercase()) {
        return Vec::new();
    }

    batch
        .cities
        .iter()
        .map(|city| city.full_name.clone())
        .collect()
}

/// A submitted value that names a suggestion exactly (an accepted completion).
fn exact_match(input: &str, batch: &SuggestionBatch) -> Option<City> {
    batch
        .cities
        .iter()
        .find(|city| city.full_name == input)
        .cloned()
}

fn is_cancel(error: &InquireError) -> bool {
    matches!(
        error,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Ask for a city until one is picked. `Ok(None)` means the user quit.
///
/// Blocks on terminal input; run it on a blocking thread.
pub fn pick_city(debouncer: Arc<SuggestionDebouncer>, runtime: Handle) -> Result<Option<City>> {
    loop {
        let autocomplete = CityAutocomplete {
            debouncer: Arc::clone(&debouncer),
            last_input: String::new(),
        };

        let input = match Text::new("City:")
            .with_placeholder("Search for a city...")
            .with_help_message("↑↓ to move, tab to complete, enter to search, esc to quit")
            .with_autocomplete(autocomplete)
            .prompt()
        {
            Ok(input) => input,
            Err(error) if is_cancel(&error) => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let latest = debouncer.latest();
        if let Some(city) = exact_match(&input, &latest) {
            return Ok(Some(city));
        }

        let batch = if latest.query == input && latest.seq == debouncer.last_issued() {
            latest
        } else {
            let seq = debouncer.submit(input.as_str());
            if is_searchable(&input) {
                eprintln!("{}", render::searching_line(&input));
            }
            runtime.block_on(debouncer.settled(seq))
        };

        if batch.cities.is_empty() {
            eprintln!("{}", render::no_options_text(&input));
            continue;
        }

        match Select::new("Select a city:", batch.cities).prompt() {
            Ok(city) => return Ok(Some(city)),
            // Esc in the list goes back to typing.
            Err(InquireError::OperationCanceled) => continue,
            Err(InquireError::OperationInterrupted) => return Ok(None),
            Err(error) => return Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(query: &str) -> SuggestionBatch {
        SuggestionBatch {
            seq: 1,
            query: query.to_string(),
            cities: vec![
                City::new("London", "United Kingdom", "GB", 51.50853, -0.12574),
                City::new("Londonderry", "United Kingdom", "GB", 54.9981, -7.30934),
            ],
        }
    }

    #[test]
    fn hints_follow_an_extended_prefix() {
        let hints = hints_for("Lond", &batch("Lon"));
        assert_eq!(hints, vec!["London, United Kingdom", "Londonderry, United Kingdom"]);

        assert_eq!(hints_for("lon", &batch("Lon")).len(), 2);
    }

    #[test]
    fn hints_hide_batches_for_other_text() {
        assert!(hints_for("Par", &batch("Lon")).is_empty());
        assert!(hints_for("Lo", &batch("Lon")).is_empty());
    }

    #[test]
    fn hints_need_two_characters() {
        assert!(hints_for("L", &batch("L")).is_empty());
        assert!(hints_for("Lon", &SuggestionBatch::default()).is_empty());
    }

    #[test]
    fn exact_match_picks_accepted_completion() {
        let city = exact_match("Londonderry, United Kingdom", &batch("Lon")).unwrap();
        assert_eq!(city.name, "Londonderry");

        assert!(exact_match("London", &batch("Lon")).is_none());
    }
}
