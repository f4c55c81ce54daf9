//! Plain-text output for lists, forms, statistics and notices.

use registry_client::{Notice, NoticeKind};
use registry_core::{
    AuthView, FieldSpec, FormValues, ListView, Resource, RowView, StatPanel, StatisticsView,
    NO_DATA,
};

pub fn list<R: Resource>(view: &ListView, search: Option<&str>) {
    match view {
        ListView::Empty(empty) => {
            println!("{}", empty.title);
            println!("{}", empty.hint);
        }
        ListView::Rows(_) => {
            let rows: Vec<&RowView> = view.filter(search.unwrap_or_default());
            let mut header = vec!["ID"];
            header.extend_from_slice(R::COLUMNS);
            println!("{}", header.join(" | "));
            for row in &rows {
                println!("{} | {}", row.id, row.cells.join(" | "));
            }
            println!("({} / {})", rows.len(), view.rows().len());
        }
    }
}

pub fn form(fields: &[FieldSpec], values: &FormValues) {
    for spec in fields {
        println!("{}: {}", spec.key, values.value(spec.field));
    }
}

pub fn statistics(view: &StatisticsView) {
    panel("Giới tính", &view.gender);
    panel("Độ tuổi", &view.age);
    panel("Phản ánh theo trạng thái", &view.feedback);
}

fn panel(title: &str, panel: &StatPanel) {
    println!("{}", title);
    match panel {
        StatPanel::Empty => println!("  {}", NO_DATA),
        StatPanel::Items(items) => {
            for item in items {
                println!("  {}: {}", item.label, item.count);
            }
        }
    }
}

pub fn auth(view: &AuthView) {
    match view {
        AuthView::Anonymous => println!("Chưa đăng nhập"),
        AuthView::SignedIn { username, role } => println!("{} ({})", username, role),
    }
}

pub fn notices(notices: &[Notice]) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => println!("✔ {}", notice.message),
            NoticeKind::Error => eprintln!("✘ {}", notice.message),
        }
    }
}
