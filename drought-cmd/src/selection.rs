//! Selection-control listings: states, districts, periods.

use crate::context::Context;
use drought_view::options::{district_options, selection_options, state_options, SelectOption, SelectionOptions};

pub fn states(ctx: &Context) -> Vec<SelectOption> {
    state_options(&ctx.index())
}

pub fn districts(ctx: &Context, state: &str) -> Vec<SelectOption> {
    district_options(&ctx.index(), state)
}

pub fn periods(ctx: &Context) -> Vec<SelectOption> {
    selection_options(&ctx.index()).periods
}

pub fn options(ctx: &Context) -> SelectionOptions {
    selection_options(&ctx.index())
}
