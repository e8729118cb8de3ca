use step_model::{
    Comparator, MouseButton, NavigationKind, SelectBy, StepFields, StepVariant, TextInputMode,
    TouchKind,
};

use crate::Command;

fn command(
    key: &'static str,
    label: &'static str,
    produces: StepVariant,
    element_scoped: bool,
    default_fields: StepFields,
) -> Command {
    Command {
        key,
        label,
        produces,
        default_fields,
        element_scoped,
    }
}

fn none() -> StepFields {
    StepFields::default()
}

fn navigation(kind: NavigationKind) -> StepFields {
    StepFields {
        navigation: Some(kind),
        ..StepFields::default()
    }
}

fn button(button: MouseButton) -> StepFields {
    StepFields {
        button: Some(button),
        ..StepFields::default()
    }
}

fn input_mode(mode: TextInputMode) -> StepFields {
    StepFields {
        input_mode: Some(mode),
        ..StepFields::default()
    }
}

fn element_condition(property: &str, comparator: Comparator, expected: Option<&str>) -> StepFields {
    StepFields {
        property: Some(property.to_string()),
        comparator: Some(comparator),
        expected: expected.map(str::to_string),
        ..StepFields::default()
    }
}

fn compare(property: &str) -> StepFields {
    StepFields {
        property: Some(property.to_string()),
        comparator: Some(Comparator::Equals),
        ..StepFields::default()
    }
}

fn script(is_async: bool) -> StepFields {
    StepFields {
        is_async: Some(is_async),
        ..StepFields::default()
    }
}

fn screenshot(file_name: &str, full_page: bool) -> StepFields {
    StepFields {
        file_name: Some(file_name.to_string()),
        full_page: Some(full_page),
        ..StepFields::default()
    }
}

fn select_by(by: SelectBy) -> StepFields {
    StepFields {
        select_by: Some(by),
        ..StepFields::default()
    }
}

fn touch(kind: TouchKind) -> StepFields {
    StepFields {
        touch: Some(kind),
        ..StepFields::default()
    }
}

fn page_condition(condition: Option<&str>, comparator: Comparator, expected: Option<&str>) -> StepFields {
    StepFields {
        condition: condition.map(str::to_string),
        comparator: Some(comparator),
        expected: expected.map(str::to_string),
        ..StepFields::default()
    }
}

pub(crate) fn authored_commands() -> Vec<Command> {
    use StepVariant as V;

    vec![
        // navigation
        command("url", "Open URL", V::Navigate, false, navigation(NavigationKind::Goto)),
        command("back", "Go back", V::Navigate, false, navigation(NavigationKind::Back)),
        command("forward", "Go forward", V::Navigate, false, navigation(NavigationKind::Forward)),
        command("refresh", "Refresh page", V::Navigate, false, navigation(NavigationKind::Refresh)),
        // pointer
        command("click", "Click", V::Click, true, button(MouseButton::Left)),
        command("rightClick", "Right click", V::Click, true, button(MouseButton::Right)),
        command("middleClick", "Middle click", V::Click, true, button(MouseButton::Middle)),
        command("doubleClick", "Double click", V::DoubleClick, true, none()),
        // text entry
        command("setValue", "Set value", V::TypeText, true, input_mode(TextInputMode::Replace)),
        command("addValue", "Add value", V::TypeText, true, input_mode(TextInputMode::Append)),
        command(
            "clearValue",
            "Clear value",
            V::TypeText,
            true,
            StepFields {
                text: Some(String::new()),
                input_mode: Some(TextInputMode::Clear),
                ..StepFields::default()
            },
        ),
        // keyboard
        command("keyDown", "Key down", V::KeyDown, false, none()),
        command("keyUp", "Key up", V::KeyUp, false, none()),
        command("pressEnter", "Press Enter", V::KeyDown, false, StepFields::key("Enter")),
        command("pressTab", "Press Tab", V::KeyDown, false, StepFields::key("Tab")),
        command("pressEscape", "Press Escape", V::KeyDown, false, StepFields::key("Escape")),
        // scrolling
        command(
            "scroll",
            "Scroll",
            V::Scroll,
            false,
            StepFields {
                delta_x: Some(0),
                delta_y: Some(0),
                into_view: Some(false),
                ..StepFields::default()
            },
        ),
        command(
            "scrollIntoView",
            "Scroll into view",
            V::Scroll,
            true,
            StepFields {
                into_view: Some(true),
                ..StepFields::default()
            },
        ),
        // element waits
        command(
            "waitForVisible",
            "Wait for visible",
            V::WaitForElementCondition,
            true,
            element_condition("visible", Comparator::Equals, Some("true")),
        ),
        command(
            "waitForExist",
            "Wait for exist",
            V::WaitForElementCondition,
            true,
            element_condition("exists", Comparator::Equals, Some("true")),
        ),
        command(
            "waitForClickable",
            "Wait for clickable",
            V::WaitForElementCondition,
            true,
            element_condition("clickable", Comparator::Equals, Some("true")),
        ),
        command(
            "waitForEnabled",
            "Wait for enabled",
            V::WaitForElementCondition,
            true,
            element_condition("enabled", Comparator::Equals, Some("true")),
        ),
        command(
            "waitForText",
            "Wait for text",
            V::WaitForElementCondition,
            true,
            element_condition("text", Comparator::Contains, None),
        ),
        // pointer movement
        command(
            "moveTo",
            "Move to",
            V::MoveTo,
            true,
            StepFields {
                offset_x: Some(0),
                offset_y: Some(0),
                ..StepFields::default()
            },
        ),
        command(
            "dragAndDrop",
            "Drag and drop",
            V::DragAndDrop,
            true,
            StepFields {
                duration_ms: Some(0),
                ..StepFields::default()
            },
        ),
        // scripting
        command("execute", "Execute script", V::ExecuteScript, false, script(false)),
        command("executeAsync", "Execute async script", V::ExecuteScript, false, script(true)),
        // assertions
        command("compareText", "Compare text", V::CompareElements, true, compare("text")),
        command("compareValue", "Compare value", V::CompareElements, true, compare("value")),
        // screenshots
        command(
            "saveScreenshot",
            "Save screenshot",
            V::SaveScreenshot,
            false,
            screenshot("screenshot.png", true),
        ),
        command(
            "saveElementScreenshot",
            "Save element screenshot",
            V::SaveScreenshot,
            true,
            screenshot("element.png", false),
        ),
        // selects
        command(
            "selectByVisibleText",
            "Select by visible text",
            V::SelectOption,
            true,
            select_by(SelectBy::VisibleText),
        ),
        command("selectByValue", "Select by value", V::SelectOption, true, select_by(SelectBy::Value)),
        command(
            "selectByIndex",
            "Select by index",
            V::SelectOption,
            true,
            StepFields {
                select_by: Some(SelectBy::Index),
                option_value: Some("0".to_string()),
                ..StepFields::default()
            },
        ),
        // touch
        command("tap", "Tap", V::TouchAction, true, touch(TouchKind::Tap)),
        command("longPress", "Long press", V::TouchAction, true, touch(TouchKind::LongPress)),
        // page waits
        command(
            "waitUntil",
            "Wait until",
            V::WaitUntilCondition,
            false,
            page_condition(None, Comparator::Equals, Some("true")),
        ),
        command(
            "waitForUrl",
            "Wait for URL",
            V::WaitUntilCondition,
            false,
            page_condition(Some("url"), Comparator::Contains, None),
        ),
        command(
            "waitForTitle",
            "Wait for title",
            V::WaitUntilCondition,
            false,
            page_condition(Some("title"), Comparator::Equals, None),
        ),
        // flow control
        command(
            "pause",
            "Pause",
            V::Pause,
            false,
            StepFields {
                duration_ms: Some(1000),
                ..StepFields::default()
            },
        ),
        command("debug", "Debug", V::Debug, false, none()),
    ]
}
