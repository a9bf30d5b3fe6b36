use html_escape::encode_quoted_attribute;

use crate::expenses::db_types::ExpenseRecord;
use crate::utils::amount::format_amount;

pub fn base_layout(content: &str) -> String {
    format!(
         r##"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Expense Ledger</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-gray-100 font-sans antialiased min-h-screen">
    <div id="main-content" class="max-w-4xl mx-auto p-8 flex flex-col gap-8">
        {content}
    </div>
</body>
</html>
"##
    )
}

pub fn index_page() -> String {
    base_layout(
        r##"
        <h1 class="text-3xl font-bold">Expense Ledger</h1>

        <div class="grid md:grid-cols-2 gap-6">
            <form id="expenseForm" class="bg-gray-800 p-6 rounded-lg border border-gray-700 flex flex-col gap-3"
                  hx-post="/ui/expenses"
                  hx-target="#expenseList"
                  hx-swap="innerHTML"
                  hx-on::after-request="if(event.detail.successful) this.reset()">
                <h2 class="text-lg font-semibold">Add Expense</h2>
                <input type="text" id="category" name="category" placeholder="Category" required
                       class="bg-gray-700 rounded px-3 py-2">
                <input type="text" inputmode="decimal" id="amount" name="amount" placeholder="Amount" required
                       class="bg-gray-700 rounded px-3 py-2">
                <button type="submit" class="bg-blue-600 hover:bg-blue-500 rounded px-4 py-2 font-medium">Add</button>
            </form>

            <form id="budgetForm" class="bg-gray-800 p-6 rounded-lg border border-gray-700 flex flex-col gap-3"
                  hx-post="/ui/budgets"
                  hx-target="#expenseList"
                  hx-swap="innerHTML"
                  hx-on::after-request="if(event.detail.successful) document.getElementById('budgetAlerts').innerHTML = ''">
                <h2 class="text-lg font-semibold">Set Budget</h2>
                <input type="text" id="budgetCategory" name="budgetCategory" placeholder="Category" required
                       class="bg-gray-700 rounded px-3 py-2">
                <input type="text" inputmode="decimal" id="budgetAmount" name="budgetAmount" placeholder="Budget amount" required
                       class="bg-gray-700 rounded px-3 py-2">
                <button type="submit" class="bg-green-700 hover:bg-green-600 rounded px-4 py-2 font-medium">Set</button>
            </form>
        </div>

        <div id="budgetAlerts"></div>

        <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
            <thead class="bg-gray-700 text-gray-300 text-sm uppercase">
                <tr><th class="px-4 py-2">Category</th><th class="px-4 py-2">Amount</th><th class="px-4 py-2">Date</th></tr>
            </thead>
            <tbody id="expenseList" hx-get="/ui/expenses" hx-trigger="load" hx-swap="innerHTML">
            </tbody>
        </table>
        "##
    )
}

/// One `<tr>` per expense, in the order given
pub fn expense_rows(expenses: &[ExpenseRecord]) -> String {
    let mut rows_html = String::new();
    for expense in expenses {
        rows_html.push_str(&format!(
            r##"<tr class="border-t border-gray-700"><td class="px-4 py-2">{}</td><td class="px-4 py-2">{}</td><td class="px-4 py-2">{}</td></tr>
"##,
            encode_quoted_attribute(&expense.category),
            format_amount(expense.amount),
            encode_quoted_attribute(&expense.date)
        ));
    }
    rows_html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(category: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            id: "x".to_string(),
            category: category.to_string(),
            amount,
            date: "10/16/2026".to_string(),
        }
    }

    #[test]
    fn test_rows_render_in_order() {
        let html = expense_rows(&[expense("Food", 12.5), expense("Rent", 900.0)]);
        assert_eq!(html.matches("<tr").count(), 2);
        let food = html.find(">Food</td>").unwrap();
        let rent = html.find(">Rent</td>").unwrap();
        assert!(food < rent);
        assert!(html.contains(">12.5</td>"));
        assert!(html.contains(">900</td>"));
        assert!(html.contains(">10/16/2026</td>"));
    }

    #[test]
    fn test_stored_text_is_escaped() {
        let html = expense_rows(&[expense("<script>alert('x')</script>", 1.0)]);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("'x'"));
        assert!(html.contains("&lt;script&gt;alert("));
        assert!(html.contains(")&lt;/script&gt;"));

        let html = expense_rows(&[expense(r#"Tom & "Jerry""#, 1.0)]);
        assert!(html.contains(">Tom &amp; &quot;Jerry&quot;</td>"));
    }

    #[test]
    fn test_nan_amount_renders_as_nan() {
        assert!(expense_rows(&[expense("Misc", f64::NAN)]).contains(">NaN</td>"));
    }

    #[test]
    fn test_page_exposes_form_contract() {
        let page = index_page();
        for id in [
            r#"id="expenseForm""#,
            r#"id="expenseList""#,
            r#"id="budgetForm""#,
            r#"id="budgetAlerts""#,
            r#"name="category""#,
            r#"name="amount""#,
            r#"name="budgetCategory""#,
            r#"name="budgetAmount""#,
        ] {
            assert!(page.contains(id), "missing {}", id);
        }

        assert!(page.contains(r#"hx-on::after-request="if(event.detail.successful) this.reset()""#));
        assert!(page.contains(
            r#"hx-on::after-request="if(event.detail.successful) document.getElementById('budgetAlerts').innerHTML = ''""#
        ));
    }
}
