pub mod anticoagulation;
