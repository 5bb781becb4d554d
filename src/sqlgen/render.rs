//! INSERT statement rendering
//!
//! Deterministic text production over a [`FormData`] aggregate. Sections are
//! emitted in a fixed order, separated by blank lines, each conditionally
//! included. One date is computed per render and shared by every statement
//! in the batch.

use super::aggregate::{FormData, NewField, PageValue};
use chrono::NaiveDate;
use std::fmt::Write;

/// Double embedded single quotes so the value is safe inside a SQL string
/// literal
pub fn sql_escape(value: &str) -> String {
    value.replace('\'', "''")
}

/// A quoted SQL string literal
fn quoted(value: &str) -> String {
    format!("'{}'", sql_escape(value))
}

/// A quoted literal, or an unquoted NULL when the value is absent
fn quoted_or_null(value: Option<&str>) -> String {
    value.map_or_else(|| "NULL".to_string(), quoted)
}

/// Render the full SQL batch for one form page.
///
/// Pure: the only time-dependent input is `today`, which callers fix for
/// reproducible output. Statements within one batch always share it.
pub fn render(form: &FormData, today: NaiveDate) -> String {
    let date = today.format("%Y-%m-%d").to_string();
    let mut blocks: Vec<String> = Vec::new();

    blocks.push(header(form));

    if form.is_new_process {
        blocks.push(org_processes(form, &date));
    }

    blocks.push(org_process_events(form, &date));
    blocks.push(admin_pages(form));

    if form.is_new_group {
        blocks.push(admin_form_groups(form));
    }

    for field_group_id in &form.field_groups {
        blocks.push(admin_field_groups(*field_group_id, form.group_id));
    }

    for field in &form.new_fields {
        blocks.push(admin_fields(field, &date));
    }

    for (idx, page_value) in form.page_values.iter().enumerate() {
        let rec_seq = idx as i64 + 1;
        blocks.push(org_page_values(form, page_value, rec_seq, &date));
    }

    blocks.join("\n\n")
}

fn header(form: &FormData) -> String {
    let rule = "=".repeat(80);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "FORM PAGE CREATION - SQL STATEMENTS");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Organization: {} (orgId: {})",
        form.org_name.as_deref().unwrap_or("NULL"),
        form.org_id.as_deref().unwrap_or("NULL"),
    );
    let _ = writeln!(
        out,
        "Process: {} (processId: {})",
        form.process_name.as_deref().unwrap_or("NULL"),
        form.process_id,
    );
    let _ = write!(
        out,
        "Page: {} (pageId: {})",
        form.page_title, form.page_id,
    );
    out
}

fn org_processes(form: &FormData, date: &str) -> String {
    let name = quoted_or_null(form.process_name.as_deref());
    format!(
        "INSERT INTO orgProcesses (\n    \
         recSeq, orgId, recStatus, processId, processName, processGroupCode, pageId, platformAccess, geoFenced,\n    \
         timeFenced, apiRouteName, externalURL, dataStatus, displaySeq, iconURL, isDefaultURL, fromDate, endDate,\n    \
         createdBy, createdOn, modifiedBy, modifiedOn\n\
         ) VALUES (\n    \
         1, {org_id}, 'A', {process_id}, {name}, NULL, {process_id}, NULL, NULL,\n    \
         NULL, {name}, NULL, 'A', 0, NULL, 0, '{date}', NULL,\n    \
         'ADMIN', CURRENT_TIMESTAMP, 'ADMIN', CURRENT_TIMESTAMP\n\
         );",
        org_id = quoted_or_null(form.org_id.as_deref()),
        process_id = form.process_id,
    )
}

fn org_process_events(form: &FormData, date: &str) -> String {
    format!(
        "INSERT INTO orgProcessEvents (\n    \
         recSeq, orgId, recStatus, dataStatus, processId, eventId, eventName, eventGroupCode, pageId, eventProcessingFile,\n    \
         isMenu, platformAccess, timeFenced, showMenu, displaySeq, fromDate, endDate, createdBy, createdOn,\n    \
         modifiedBy, modifiedOn\n\
         ) VALUES (\n    \
         1, {org_id}, 'A', 'A', {process_id}, {event_id}, {event_name}, NULL, {page_id}, '',\n    \
         'Y', NULL, NULL, 'Y', 10, '{date}', NULL, 'ADMIN', CURRENT_TIMESTAMP,\n    \
         'ADMIN', CURRENT_TIMESTAMP\n\
         );",
        org_id = quoted_or_null(form.org_id.as_deref()),
        process_id = form.process_id,
        event_id = form.event_id,
        event_name = quoted(form.event_name()),
        page_id = form.page_id,
    )
}

fn admin_pages(form: &FormData) -> String {
    format!(
        "INSERT INTO adminPages (\n    \
         pageId, recStatus, pageURL, pageTitle, pageDisplayName, processId, eventId, pageType,\n    \
         hideProcessEvents, pageSize, language, createdBy, createdOn, modifiedBy, modifiedOn\n\
         ) VALUES (\n    \
         {page_id}, 'A', {page_url}, {page_title}, {page_title}, {process_id}, {event_id}, 'F',\n    \
         'Y', 12, 'en_US', 'ADMIN', CURRENT_TIMESTAMP, 'ADMIN', CURRENT_TIMESTAMP\n\
         );",
        page_id = form.page_id,
        page_url = quoted(&form.page_url),
        page_title = quoted(&form.page_title),
        process_id = form.process_id,
        event_id = form.event_id,
    )
}

fn admin_form_groups(form: &FormData) -> String {
    format!(
        "INSERT INTO adminFormGroups (\n    \
         groupId, recStatus, groupName, groupStatus, displayDivLength, displaySeq,\n    \
         createdBy, createdOn, modifiedBy, modifiedOn\n\
         ) VALUES (\n    \
         {group_id}, 'A', {group_name}, 'A', 12, 0,\n    \
         'ADMIN', CURRENT_TIMESTAMP, 'ADMIN', CURRENT_TIMESTAMP\n\
         );",
        group_id = form.group_id,
        group_name = quoted(&form.group_name()),
    )
}

fn admin_field_groups(field_group_id: i64, group_id: i64) -> String {
    format!(
        "INSERT INTO adminFieldGroups (\n    \
         fieldGroupId, recStatus, groupId, fieldGroupStatus, displayDivLength, displaySeq,\n    \
         createdBy, createdOn, modifiedBy, modifiedOn\n\
         ) VALUES (\n    \
         {field_group_id}, 'A', {group_id}, 'A', 12, 0,\n    \
         'ADMIN', CURRENT_TIMESTAMP, 'ADMIN', CURRENT_TIMESTAMP\n\
         );",
    )
}

fn admin_fields(field: &NewField, date: &str) -> String {
    format!(
        "INSERT INTO adminFields (\n    \
         fieldId, recStatus, fieldType, fieldStatus, dataFieldId, remarks, fromDate,\n    \
         displayType, defaultValue, validationType, createdBy, createdOn, modifiedBy, modifiedOn\n\
         ) VALUES (\n    \
         {field_id}, 'A', 'D', 'A', {field_id}, '', '{date}',\n    \
         {display_type}, '', {validation_type}, 'ADMIN', CURRENT_TIMESTAMP, 'ADMIN', CURRENT_TIMESTAMP\n\
         );",
        field_id = quoted(&field.field_id),
        display_type = quoted(field.display_type.as_deref().unwrap_or("label")),
        validation_type = quoted(field.validation_type.as_deref().unwrap_or("E")),
    )
}

fn org_page_values(form: &FormData, pv: &PageValue, rec_seq: i64, date: &str) -> String {
    format!(
        "INSERT INTO orgPageValues (\n    \
         pageId, recSeq, orgId, recStatus, groupId, fieldGroupId, fieldId,\n    \
         displayLabel, displayType, displaySubType, displayChannel, displayDivLength, displayLanguage, displaySeq,\n    \
         displayDataLength, labelAlignment, required, mandatory, pageValueStatus, dependsOnValue, isRelativeTimeZone,\n    \
         noWrap, isFilterable, sortable, fromDate, helpText, defaultValue, validationType,\n    \
         createdBy, createdOn, modifiedBy, modifiedOn\n\
         ) VALUES (\n    \
         {page_id}, {rec_seq}, {org_id}, 'A', {group_id}, {field_group_id}, {field_id},\n    \
         {display_label}, {display_type}, 'search',\n    \
         'D', 12, 'en_US', 10, 0,\n    \
         'left', 'Y', 'Y', 'A', NULL, 0, 'Y',\n    \
         NULL, NULL, '{date}', '', '',\n    \
         {validation_type},\n    \
         'ADMIN', CURRENT_TIMESTAMP, 'ADMIN', CURRENT_TIMESTAMP\n\
         );",
        page_id = form.page_id,
        org_id = quoted_or_null(form.org_id.as_deref()),
        group_id = pv.group_id,
        field_group_id = pv.field_group_id,
        field_id = quoted(&pv.field_id),
        display_label = quoted_or_null(pv.display_label.as_deref()),
        display_type = quoted_or_null(pv.display_type.as_deref()),
        validation_type = quoted_or_null(pv.validation_type.as_deref()),
    )
}
