use crate::domain::contact::Contact;

#[derive(serde::Serialize)]
pub struct ListContactsResponseBody {
    pub contacts: Vec<Contact>,
    pub countries: Vec<String>,
}
