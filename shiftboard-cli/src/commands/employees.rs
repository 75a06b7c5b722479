//! `shiftboard employees ...`

use shiftboard_lib::api::ListParams;
use shiftboard_lib::form::EmployeeDraft;
use shiftboard_lib::form::EmployeePatch;
use shiftboard_lib::form::parse_skills;
use shiftboard_lib::model::EmployeeColumn;
use shiftboard_lib::view::Column;

use super::Context;
use super::FETCH_LIMIT;
use super::build_view;
use super::show_view;
use crate::cli::EmployeeFields;
use crate::cli::EmployeeUpdateFields;
use crate::cli::EmployeesCommand;
use crate::error::CliError;
use crate::render;

pub async fn run(command: EmployeesCommand, ctx: &Context) -> Result<(), CliError> {
    match command {
        EmployeesCommand::List { view, active } => {
            let mut params = ListParams::new().limit(FETCH_LIMIT);
            params.active_only = active.filter();
            let employees = ctx.client.list_employees(params).await?;
            let table = build_view(employees, EmployeeColumn::defaults(), &view, ctx.settings.page_size)?;
            show_view(&table, &view, "employees.csv")
        }
        EmployeesCommand::Show { id } => {
            let employee = ctx.client.get_employee(id).await?;
            print!("{}", render::details(&detail_columns(), &employee));
            Ok(())
        }
        EmployeesCommand::Create(fields) => {
            let created = ctx.client.create_employee(&draft(fields)).await?;
            println!("Created employee {} ({})", created.id, created.name);
            Ok(())
        }
        EmployeesCommand::Update { id, fields } => {
            let patch = patch(fields);
            if patch.is_empty() {
                return Err(CliError::usage("nothing to update, pass at least one field"));
            }
            let updated = ctx.client.update_employee(id, &patch).await?;
            println!("Updated employee {} ({})", updated.id, updated.name);
            Ok(())
        }
        EmployeesCommand::Delete { id } => {
            ctx.client.delete_employee(id).await?;
            println!("Deleted employee {id}");
            Ok(())
        }
    }
}

fn detail_columns() -> Vec<Column<EmployeeColumn>> {
    let mut columns = vec![Column::new(EmployeeColumn::Id, "Id")];
    columns.extend(EmployeeColumn::defaults());
    columns.push(Column::new(EmployeeColumn::Phone, "Phone"));
    columns
}

fn draft(fields: EmployeeFields) -> EmployeeDraft {
    EmployeeDraft {
        name: fields.name.trim().to_string(),
        email: fields.email.trim().to_string(),
        phone: fields.phone.filter(|p| !p.trim().is_empty()),
        position: fields.position.filter(|p| !p.trim().is_empty()),
        skills: parse_skills(&fields.skills),
        hourly_rate: fields.rate,
    }
}

fn patch(fields: EmployeeUpdateFields) -> EmployeePatch {
    EmployeePatch {
        name: fields.name,
        email: fields.email,
        phone: fields.phone,
        position: fields.position,
        skills: fields.skills.as_deref().map(parse_skills),
        hourly_rate: fields.rate,
        is_active: fields.active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_from_flags() {
        let draft = draft(EmployeeFields {
            name: " Ana ".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some(" ".to_string()),
            position: None,
            skills: "caja, caja, reposicion".to_string(),
            rate: 11.0,
        });
        assert_eq!(draft.name, "Ana");
        assert!(draft.phone.is_none());
        assert_eq!(draft.skills, ["caja", "reposicion"]);
    }

    #[test]
    fn test_empty_patch() {
        let patch = patch(EmployeeUpdateFields {
            name: None,
            email: None,
            phone: None,
            position: None,
            skills: None,
            rate: None,
            active: None,
        });
        assert!(patch.is_empty());
    }
}
