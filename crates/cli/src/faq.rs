//! Static FAQ panel.

/// One question and its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub static FAQS: [FaqEntry; 5] = [
    FaqEntry {
        question: "Why is checking drug interactions important?",
        answer: "Drug interactions can significantly alter the effectiveness of medications or lead to unexpected side effects. Some interactions may reduce the therapeutic benefit, while others can increase toxicity. By checking interactions before combining drugs, patients and healthcare providers can prevent adverse events, ensure proper dosing, and optimize treatment outcomes. Awareness of potential interactions is crucial for safety, especially for individuals on multiple medications or with chronic conditions.",
    },
    FaqEntry {
        question: "Can drug interactions affect common medications?",
        answer: "Yes, even widely prescribed or over-the-counter medications can interact with each other. For example, pain relievers, blood thinners, and certain antibiotics may have synergistic or antagonistic effects when combined. These interactions may not always produce immediate symptoms but can lead to long-term health risks. Regularly checking for interactions helps avoid complications and ensures that routine medications are safe when taken together.",
    },
    FaqEntry {
        question: "Do herbal supplements and vitamins cause interactions?",
        answer: "Absolutely. Herbal supplements, vitamins, and even certain foods can interact with prescription medications. For instance, St. John's Wort can reduce the effectiveness of some antidepressants, while high doses of vitamin K can interfere with blood thinners. It is essential to consider all substances a patient is taking - prescribed, over-the-counter, or natural - to fully assess interaction risk and maintain treatment safety.",
    },
    FaqEntry {
        question: "How do healthcare providers assess interactions?",
        answer: "Healthcare providers use scientific databases, clinical guidelines, and patient history to evaluate potential interactions. They consider factors such as dosage, timing, patient age, organ function, and comorbidities. By systematically assessing these factors, providers can predict, monitor, and mitigate adverse interactions, ensuring that patients receive the maximum benefit from their medications without unnecessary risk.",
    },
    FaqEntry {
        question: "What should patients do to avoid harmful interactions?",
        answer: "Patients should maintain an up-to-date list of all medications, supplements, and over-the-counter products they use. Sharing this list with healthcare providers allows for accurate assessment of potential interactions. Patients should also follow dosing instructions carefully, report unusual symptoms promptly, and use reliable tools or apps to check interactions. Proactive monitoring significantly reduces the risk of adverse effects and ensures safer, more effective treatment.",
    },
];

/// Accordion over [`FAQS`] with at most one entry open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaqAccordion {
    open: Option<usize>,
}

impl FaqAccordion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open entry `index`, or close it if it is already open. Out-of-range indexes are ignored.
    ///
    /// Returns the entry open afterwards.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        if index < FAQS.len() {
            self.open = if self.open == Some(index) {
                None
            } else {
                Some(index)
            };
        }
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Entries paired with whether each is expanded.
    pub fn entries(&self) -> impl Iterator<Item = (&'static FaqEntry, bool)> + '_ {
        FAQS.iter()
            .enumerate()
            .map(move |(index, entry)| (entry, self.is_open(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_entry_open_at_a_time() {
        let mut faq = FaqAccordion::new();
        assert_eq!(faq.toggle(1), Some(1));
        assert_eq!(faq.toggle(3), Some(3));
        assert!(!faq.is_open(1));
        assert_eq!(faq.entries().filter(|(_, open)| *open).count(), 1);
    }

    #[test]
    fn toggling_open_entry_closes_it() {
        let mut faq = FaqAccordion::new();
        faq.toggle(2);
        assert_eq!(faq.toggle(2), None);
        assert!(faq.entries().all(|(_, open)| !open));
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut faq = FaqAccordion::new();
        faq.toggle(0);
        assert_eq!(faq.toggle(FAQS.len()), Some(0));
    }
}
