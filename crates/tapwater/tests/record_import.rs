use std::io::Cursor;

use tapwater::assessment::{
    ActionLevelStatus, HardnessClassification, SafetyVerdict, WaterQualityAssessor, WaterSource,
};
use tapwater::import::{CityRecordImporter, ImportError};
use tapwater::ranking::rank_by_concern;

const EXPORT: &str = "\
state,slug,city,county,population,water_system_count,utility_name,pwsid,primary_source,hardness_ppm,lead_ppb_90th,lead_action_level_ppb,copper_ppm_90th,copper_action_level_ppm,lead_sample_date,violations_total_3yr,violations_health_based_3yr,has_active_violations
WI,milwaukee,MILWAUKEE,Milwaukee,\"577,222\",1,Milwaukee Water Works,WI2410085,Surface Water,133,7.0,15,0.1,1.3,2023-06-30,2,0,false
WI,madison,MADISON,Dane,\"269,840\",1,Madison Water Utility,WI1130224,Ground Water,340,1.5,,,,,4,2,no
WI,green-bay,GREEN BAY,Brown,107395,2,,,Purchased Surface Water,,16.2,,,,12/15/2022,9,3,yes
";

#[test]
fn export_rows_become_assessable_records() {
    let assessor = WaterQualityAssessor::default();
    let records =
        CityRecordImporter::from_reader(Cursor::new(EXPORT), &assessor).expect("export imports");

    assert_eq!(records.len(), 3);

    let milwaukee = assessor.profile(&records[0]).expect("profile builds");
    assert_eq!(milwaukee.hardness, Some(HardnessClassification::Hard));
    assert_eq!(milwaukee.lead, ActionLevelStatus::Good);
    assert_eq!(milwaukee.safety.verdict, SafetyVerdict::Safe);

    let madison = &records[1];
    assert_eq!(madison.primary_source, Some(WaterSource::GroundWater));
    assert_eq!(madison.copper_ppm_90th, None);
    let madison = assessor.profile(madison).expect("profile builds");
    assert_eq!(madison.hardness, Some(HardnessClassification::VeryHard));
    assert_eq!(madison.safety.verdict, SafetyVerdict::Concerns);

    let green_bay = &records[2];
    assert_eq!(green_bay.display_name(), "Green Bay");
    assert_eq!(green_bay.water_system_count, 2);
    assert!(green_bay.has_active_violations);
    assert_eq!(
        assessor.assess(green_bay).expect("assessment").verdict,
        SafetyVerdict::Unsafe
    );
}

#[test]
fn imported_records_feed_the_concern_ranking() {
    let assessor = WaterQualityAssessor::default();
    let records =
        CityRecordImporter::from_reader(Cursor::new(EXPORT), &assessor).expect("export imports");

    let ranked = rank_by_concern(&assessor, &records, 2);

    let slugs: Vec<&str> = ranked.iter().map(|city| city.key.slug.as_str()).collect();
    assert_eq!(slugs, vec!["green-bay", "madison"]);
    assert_eq!(ranked[0].score, 215);
    assert_eq!(ranked[1].score, 90);
}

#[test]
fn malformed_export_reports_the_offending_line() {
    let export = EXPORT.replace("\"269,840\"", "unknown");

    let error = CityRecordImporter::from_reader(
        Cursor::new(export),
        &WaterQualityAssessor::default(),
    )
    .expect_err("population is not a number");

    match error {
        ImportError::InvalidField { line, field, .. } => {
            assert_eq!(line, 3);
            assert_eq!(field, "population");
        }
        other => panic!("expected invalid field, got {other:?}"),
    }
}
