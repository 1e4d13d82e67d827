//! Terminal rendering of the checker panels.

use crate::faq::FaqAccordion;
use crate::selection::Selection;
use crate::severity::CardStyle;
use crossterm::{
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
};
use dic_types::{Drug, DrugId, Interaction};
use std::collections::HashMap;
use std::io::{self, Write};

pub const NO_INTERACTIONS: &str = "✅ No interactions found for the selected drugs.";

/// One interaction result, labelled and styled for display.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionCard {
    pub first: String,
    pub second: String,
    pub severity: String,
    pub description: String,
    pub style: CardStyle,
}

/// Label each interaction with drug names from `names`.
///
/// Ids missing from `names` are shown as `drug #<id>`.
pub fn build_cards(
    interactions: &[Interaction],
    names: &HashMap<DrugId, String>,
) -> Vec<InteractionCard> {
    let label = |id: DrugId| {
        names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("drug #{id}"))
    };

    interactions
        .iter()
        .map(|interaction| InteractionCard {
            first: label(interaction.drug1_id),
            second: label(interaction.drug2_id),
            severity: interaction.severity.clone().unwrap_or_default(),
            description: interaction.description.clone().unwrap_or_default(),
            style: CardStyle::for_severity(&interaction.severity_level()),
        })
        .collect()
}

/// Write the interaction panel.
///
/// Nothing is written until a check has produced a response.
pub fn write_results<W: Write>(
    out: &mut W,
    interactions: Option<&[Interaction]>,
    names: &HashMap<DrugId, String>,
) -> io::Result<()> {
    let Some(interactions) = interactions else {
        return Ok(());
    };

    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print("Interactions:\n"),
        SetAttribute(Attribute::Reset)
    )?;

    if interactions.is_empty() {
        queue!(
            out,
            SetForegroundColor(Color::Green),
            SetAttribute(Attribute::Bold),
            Print(NO_INTERACTIONS),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n")
        )?;
        return out.flush();
    }

    for card in build_cards(interactions, names) {
        write_card(out, &card)?;
    }
    out.flush()
}

fn write_card<W: Write>(out: &mut W, card: &InteractionCard) -> io::Result<()> {
    let accent = Color::from(card.style.accent);
    let tint = Color::from(card.style.background());

    queue!(
        out,
        SetForegroundColor(accent),
        Print("▌ "),
        SetBackgroundColor(tint),
        SetForegroundColor(Color::Black),
        SetAttribute(Attribute::Bold),
        Print(&card.first),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(tint),
        SetForegroundColor(Color::Black),
        Print(" ↔ "),
        SetAttribute(Attribute::Bold),
        Print(&card.second),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("\n")
    )?;
    queue!(
        out,
        SetForegroundColor(accent),
        Print("▌ "),
        ResetColor,
        SetAttribute(Attribute::Bold),
        Print("Severity: "),
        SetAttribute(Attribute::Reset),
        SetForegroundColor(Color::from(card.style.text)),
        Print(&card.severity),
        ResetColor,
        Print("\n")
    )?;
    queue!(
        out,
        SetForegroundColor(accent),
        Print("▌ "),
        ResetColor,
        Print(&card.description),
        Print("\n\n")
    )
}

/// Write the selected-drug tags and summary line.
pub fn write_selection<W: Write>(out: &mut W, selection: &Selection) -> io::Result<()> {
    for drug in selection.drugs() {
        queue!(
            out,
            SetAttribute(Attribute::Reverse),
            Print(format!(" {} (#{}) × ", drug.name, drug.id)),
            SetAttribute(Attribute::Reset),
            Print(" ")
        )?;
    }
    if !selection.is_empty() {
        queue!(out, Print("\n"))?;
    }
    queue!(out, Print(format!("Selected Drugs: {}\n", selection.summary())))?;
    out.flush()
}

/// Write numbered suggestions, numbering from 1.
pub fn write_suggestions<W: Write>(out: &mut W, suggestions: &[Drug]) -> io::Result<()> {
    for (index, drug) in suggestions.iter().enumerate() {
        queue!(out, Print(format!("  [{}] {}\n", index + 1, drug.name)))?;
    }
    out.flush()
}

/// Write search results as `#id  name` lines.
pub fn write_drugs<W: Write>(out: &mut W, drugs: &[Drug]) -> io::Result<()> {
    for drug in drugs {
        queue!(out, Print(format!("#{:<6} {}\n", drug.id, drug.name)))?;
    }
    out.flush()
}

/// Write the FAQ panel with the open entry expanded.
pub fn write_faq<W: Write>(out: &mut W, faq: &FaqAccordion) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print("FAQs\n"),
        SetAttribute(Attribute::Reset)
    )?;
    for (index, (entry, open)) in faq.entries().enumerate() {
        let marker = if open { "−" } else { "+" };
        queue!(
            out,
            Print(format!("{}. {} {}\n", index + 1, entry.question, marker))
        )?;
        if open {
            queue!(out, Print(format!("   {}\n", entry.answer)))?;
        }
    }
    out.flush()
}
