use crate::db::schema::known_buttons;
use diesel::prelude::*;

#[derive(Debug, Queryable)]
#[diesel(table_name = known_buttons)]
pub struct KnownButtonRow {
    pub mac: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = known_buttons)]
pub struct NewKnownButtonRow<'a> {
    pub mac: &'a str,
}
