//! Demo inputs for trying the tool without a dataset at hand

/// Six months of sales, cost and satisfaction figures
pub const DEMO_DATASET: &str = "Month,Sales,Cost,CustomerSatisfaction
Jan,120000,80000,4.2
Feb,150000,85000,4.5
Mar,110000,82000,4.0
Apr,180000,90000,4.8
May,200000,95000,4.7
Jun,170000,88000,4.3";

/// A developer job description covering web apps, PostgreSQL and internal tools
pub const DEMO_SCOPE: &str = "รับผิดชอบการพัฒนา Web Application ดูแลระบบ Database (PostgreSQL)
และสร้าง Internal Tools สำหรับฝ่ายขายและฝ่ายการตลาด
มีความรู้เรื่อง Python และ Data Visualization";
