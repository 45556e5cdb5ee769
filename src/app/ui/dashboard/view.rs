use crate::domain::{
    contact::{Contact, ContactFilter, FlagFilter, Selection},
    newsletter::NewsletterSummary,
};

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Filter bar controls, with the stored filter preselected.
pub struct FilterView {
    pub search: String,
    pub countries: Vec<SelectOption>,
    pub subscribed: Vec<SelectOption>,
    pub active: Vec<SelectOption>,
}

fn flag_options(current: FlagFilter, labels: [&str; 3]) -> Vec<SelectOption> {
    [FlagFilter::All, FlagFilter::Yes, FlagFilter::No]
        .into_iter()
        .zip(labels)
        .map(|(flag, label)| SelectOption::new(flag.to_string(), label, flag == current))
        .collect()
}

impl FilterView {
    pub fn new(filter: &ContactFilter, countries: Vec<String>) -> Self {
        let current_country = filter.country.as_str();
        let countries = std::iter::once(SelectOption::new(
            "all",
            "All Countries",
            current_country == "all",
        ))
        .chain(countries.into_iter().map(|country| {
            let selected = country == current_country;
            SelectOption::new(country.clone(), country, selected)
        }))
        .collect();

        Self {
            search: filter.search.clone(),
            countries,
            subscribed: flag_options(
                filter.subscribed,
                ["All Subscribers", "Subscribed", "Not Subscribed"],
            ),
            active: flag_options(filter.active, ["All Status", "Active", "Inactive"]),
        }
    }
}

pub struct ContactRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub country: String,
    pub subscribed: bool,
    pub active: bool,
    pub selected: bool,
}

impl ContactRow {
    pub fn new(contact: &Contact, selection: &Selection) -> Self {
        Self {
            id: contact.id,
            name: contact.full_name(),
            email: contact.email.clone(),
            country: contact.country.clone(),
            subscribed: contact.subscribed_newsletters,
            active: contact.is_active,
            selected: selection.contains(contact.id),
        }
    }
}

pub struct HistoryRow {
    pub subject: String,
    pub sent_at: String,
    pub total_recipients: i32,
    pub attached_recipients: i64,
    pub incomplete: bool,
}

impl From<NewsletterSummary> for HistoryRow {
    fn from(summary: NewsletterSummary) -> Self {
        Self {
            incomplete: summary.is_incomplete(),
            sent_at: summary.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            subject: summary.subject,
            total_recipients: summary.total_recipients,
            attached_recipients: summary.attached_recipients,
        }
    }
}
