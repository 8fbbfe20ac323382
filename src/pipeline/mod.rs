pub mod stage1_load;
pub mod stage2_decode;
pub mod stage3_theta;
pub mod stage4_components;
pub mod stage5_heatmap;
pub mod stage6_comparison;
pub mod stage7_gene_scatter;
pub mod stage8_report;
