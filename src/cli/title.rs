//! Title command implementation

use studyxp::ProgressStore;

/// List earned titles, or wear `title`
pub fn title_command(store: &mut ProgressStore, title: Option<&str>) {
    let Some(title) = title else {
        for t in store.titles() {
            let mark = if t == store.current_title() { "*" } else { " " };
            println!("  {mark} {t}");
        }
        return;
    };

    if store.set_current_title(title) {
        println!("Now wearing: {title}");
    } else {
        println!("Title not earned yet: {title}");
    }
}
