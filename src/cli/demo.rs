use colored::Colorize;
use std::cell::Cell;
use std::rc::Rc;
use termenu::Menu;
use tracing::info;

/// Builds the demo menu: two greetings and a counter of how many greetings were shown.
pub fn demo_menu() -> Menu {
    let greeted = Rc::new(Cell::new(0_u32));
    let (hi, bye, count) = (Rc::clone(&greeted), Rc::clone(&greeted), greeted);

    Menu::new()
        .entry("1. Say hi", move || {
            info!("Saying hi");
            hi.set(hi.get() + 1);
            println!("{}", "Hi there!".cyan());
        })
        .entry("2. Say bye", move || {
            info!("Saying bye");
            bye.set(bye.get() + 1);
            println!("{}", "Goodbye for now!".cyan());
        })
        .entry("3. Show greeting count", move || {
            println!("Greetings so far: {}", count.get());
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_menu_labels() {
        let menu = demo_menu();
        assert_eq!(
            menu.labels().collect::<Vec<_>>(),
            ["1. Say hi", "2. Say bye", "3. Show greeting count"]
        );
        assert_eq!(menu.exit_label(), "4. Exit");
    }
}
