//! `shiftboard shifts ...`

use shiftboard_lib::api::ListParams;
use shiftboard_lib::form::ShiftDraft;
use shiftboard_lib::form::ShiftPatch;
use shiftboard_lib::form::parse_skills;
use shiftboard_lib::model::ShiftColumn;
use shiftboard_lib::view::Column;

use super::Context;
use super::FETCH_LIMIT;
use super::build_view;
use super::show_view;
use crate::cli::ShiftFields;
use crate::cli::ShiftUpdateFields;
use crate::cli::ShiftsCommand;
use crate::error::CliError;
use crate::render;

pub async fn run(command: ShiftsCommand, ctx: &Context) -> Result<(), CliError> {
    match command {
        ShiftsCommand::List { view, active } => {
            let mut params = ListParams::new().limit(FETCH_LIMIT);
            params.active_only = active.filter();
            let shifts = ctx.client.list_shifts(params).await?;
            let table = build_view(shifts, ShiftColumn::defaults(), &view, ctx.settings.page_size)?;
            show_view(&table, &view, "shifts.csv")
        }
        ShiftsCommand::Show { id } => {
            let shift = ctx.client.get_shift(id).await?;
            let mut columns = vec![Column::new(ShiftColumn::Id, "Id")];
            columns.extend(ShiftColumn::defaults());
            print!("{}", render::details(&columns, &shift));
            Ok(())
        }
        ShiftsCommand::Create(fields) => {
            let created = ctx.client.create_shift(&draft(fields)).await?;
            println!("Created shift {} ({})", created.id, created.name);
            Ok(())
        }
        ShiftsCommand::Update { id, fields } => {
            let patch = patch(fields);
            if patch.is_empty() {
                return Err(CliError::usage("nothing to update, pass at least one field"));
            }
            let updated = ctx.client.update_shift(id, &patch).await?;
            println!("Updated shift {} ({})", updated.id, updated.name);
            Ok(())
        }
        ShiftsCommand::Delete { id } => {
            ctx.client.delete_shift(id).await?;
            println!("Deleted shift {id}");
            Ok(())
        }
    }
}

fn draft(fields: ShiftFields) -> ShiftDraft {
    ShiftDraft {
        name: fields.name.trim().to_string(),
        start_time: fields.start.trim().to_string(),
        end_time: fields.end.trim().to_string(),
        day_of_week: fields.day,
        required_skills: parse_skills(&fields.skills),
        min_employees: fields.min,
        max_employees: fields.max,
        cost_multiplier: fields.cost,
    }
}

fn patch(fields: ShiftUpdateFields) -> ShiftPatch {
    ShiftPatch {
        name: fields.name,
        start_time: fields.start,
        end_time: fields.end,
        day_of_week: fields.day,
        required_skills: fields.skills.as_deref().map(parse_skills),
        min_employees: fields.min,
        max_employees: fields.max,
        cost_multiplier: fields.cost,
        is_active: fields.active,
    }
}
