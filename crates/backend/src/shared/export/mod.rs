pub mod receivables_workbook;
