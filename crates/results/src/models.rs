// crate modules
use crate::cursor::{LineCursor, ResultSection};
use crate::error::{Error, Result};
use crate::parsers::colon_value;
use crate::tags;

// xtools modules
use xtools_deck::{Deck, ModelChoice, ModelFamily, Models};
use xtools_schema::SchemaVersion;

// external crates
use log::debug;

/// Model selection printed as `Label: Display name`, one family per line
///
/// Only the families that exist for the schema version are listed, in deck
/// order. The names resolve back to the same [Models] record the `.mdl` deck
/// holds, so a result file can be used to recover the deck it came from.
impl ResultSection for Models {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        debug!("-------------------------");
        debug!(" Parsing Model Parameters ");
        debug!("-------------------------");

        let mut cursor = LineCursor::new(lines, version);
        cursor.expect_tag(tags::MODELS)?;

        let mut models = Models::new(version);
        for family in ModelFamily::ALL {
            if !family.gate().admits(version) {
                continue;
            }
            let choice = read_choice(&mut cursor, family)?;
            debug!("{:<36} = {}", family.label(), choice.name());
            models.set(choice);
        }

        Ok((models, cursor.position()))
    }
}

fn read_choice<S: AsRef<str>>(cursor: &mut LineCursor<S>, family: ModelFamily) -> Result<ModelChoice> {
    cursor.skip_blank_lines();
    let line = cursor.next_line()?;
    match colon_value(line) {
        Ok((_, (label, name))) if label == family.label() => {
            Ok(ModelChoice::from_text(family, name)?)
        }
        _ => Err(Error::TagNotFound {
            tag: family.label().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtools_schema::{VERSION_1_1_1, VERSION_1_5_2};

    fn lines(version: SchemaVersion) -> Vec<String> {
        let mut lines = vec![tags::MODELS.to_string()];
        for choice in Models::new(version).choices() {
            lines.push(format!("{}: {}", choice.family().label(), choice.name()));
        }
        lines
    }

    #[test]
    fn resolves_to_deck_defaults() {
        for version in [VERSION_1_1_1, VERSION_1_5_2] {
            let lines = lines(version);
            let (models, consumed) = Models::read_from_lines(&lines, version).unwrap();
            assert_eq!(models, Models::new(version));
            assert_eq!(consumed, lines.len());
        }
    }

    #[test]
    fn unknown_name() {
        let mut lines = lines(VERSION_1_1_1);
        lines[2] = "Atom Energy Loss: Landau 1944".to_string();
        let result = Models::read_from_lines(&lines, VERSION_1_1_1);
        assert!(matches!(
            result,
            Err(Error::Deck(xtools_deck::Error::UnknownModelName { .. }))
        ));
    }
}
