pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
    pub active: bool,
}

const ITEMS: [(&str, &str); 4] = [
    ("Compose", "/dashboard"),
    ("Contacts", "/dashboard/contacts"),
    ("History", "/dashboard/history"),
    ("Analytics", "/dashboard/analytics"),
];

pub fn nav(current: &str) -> Vec<NavItem> {
    ITEMS
        .iter()
        .map(|&(title, href)| NavItem {
            title,
            href,
            active: href == current,
        })
        .collect()
}
