//! Shared test export and logging setup.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,healthexport=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Three workouts: a fully described run, a yoga session without statistics,
/// and a walk with partial and malformed statistics. Four activity days, the
/// last with an unparsable exercise time.
pub const SAMPLE_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE HealthData [
<!ELEMENT HealthData (ExportDate,Me,(Workout|ActivitySummary)*)>
<!ATTLIST HealthData locale CDATA #REQUIRED>
]>
<HealthData locale="en_GB">
 <ExportDate value="2024-03-01 10:00:00 +0000"/>
 <Me HKCharacteristicTypeIdentifierDateOfBirth="1990-06-15" HKCharacteristicTypeIdentifierBiologicalSex="HKBiologicalSexFemale"/>
 <Workout workoutActivityType="HKWorkoutActivityTypeRunning" duration="30.5" durationUnit="min" sourceName="Watch" sourceVersion="10.1" device="&lt;&lt;HKDevice&gt;&gt;" creationDate="2024-01-10 08:35:00 +0000" startDate="2024-01-10 08:00:00 +0000" endDate="2024-01-10 08:30:30 +0000">
  <WorkoutStatistics type="HKQuantityTypeIdentifierActiveEnergyBurned" startDate="2024-01-10 08:00:00 +0000" endDate="2024-01-10 08:30:30 +0000" sum="310.5" unit="kcal"/>
  <WorkoutStatistics type="HKQuantityTypeIdentifierBasalEnergyBurned" startDate="2024-01-10 08:00:00 +0000" endDate="2024-01-10 08:30:30 +0000" sum="40.25" unit="kcal"/>
  <WorkoutStatistics type="HKQuantityTypeIdentifierDistanceWalkingRunning" startDate="2024-01-10 08:00:00 +0000" endDate="2024-01-10 08:30:30 +0000" sum="5.2" unit="km"/>
  <WorkoutStatistics type="HKQuantityTypeIdentifierHeartRate" startDate="2024-01-10 08:00:00 +0000" endDate="2024-01-10 08:30:30 +0000" average="152" minimum="98" maximum="181" unit="count/min"/>
  <WorkoutStatistics type="HKQuantityTypeIdentifierRunningSpeed" startDate="2024-01-10 08:00:00 +0000" endDate="2024-01-10 08:30:30 +0000" average="10.2" minimum="6.1" maximum="14.8" unit="km/hr"/>
 </Workout>
 <Workout workoutActivityType="HKWorkoutActivityTypeYoga" duration="45" durationUnit="min" sourceName="Watch" sourceVersion="10.1" creationDate="2024-01-12 19:50:00 +0000" startDate="2024-01-12 19:00:00 +0000" endDate="2024-01-12 19:45:00 +0000"/>
 <Workout workoutActivityType="HKWorkoutActivityTypeWalking" duration="n/a" durationUnit="min" sourceName="Phone" creationDate="2024-01-12 21:00:00 +0000" startDate="2024-01-12 20:00:00 +0000" endDate="2024-01-12 20:50:00 +0000">
  <WorkoutStatistics type="HKQuantityTypeIdentifierActiveEnergyBurned" startDate="2024-01-12 20:00:00 +0000" endDate="2024-01-12 20:50:00 +0000" sum="120" unit="kcal"/>
  <WorkoutStatistics type="HKQuantityTypeIdentifierHeartRate" startDate="2024-01-12 20:00:00 +0000" endDate="2024-01-12 20:50:00 +0000" average="101" minimum="bad" unit="count/min"/>
 </Workout>
 <ActivitySummary dateComponents="2024-01-10" activeEnergyBurned="450.5" activeEnergyBurnedGoal="400" activeEnergyBurnedUnit="kcal" appleMoveTime="0" appleMoveTimeGoal="0" appleExerciseTime="45" appleExerciseTimeGoal="30" appleStandHours="10" appleStandHoursGoal="12"/>
 <ActivitySummary dateComponents="2024-01-11" activeEnergyBurned="210" activeEnergyBurnedGoal="400" activeEnergyBurnedUnit="kcal" appleMoveTime="0" appleMoveTimeGoal="0" appleExerciseTime="20" appleExerciseTimeGoal="30" appleStandHours="8" appleStandHoursGoal="12"/>
 <ActivitySummary dateComponents="2024-01-12" activeEnergyBurned="620" activeEnergyBurnedGoal="400" activeEnergyBurnedUnit="kcal" appleMoveTime="0" appleMoveTimeGoal="0" appleExerciseTime="95" appleExerciseTimeGoal="30" appleStandHours="13" appleStandHoursGoal="12"/>
 <ActivitySummary dateComponents="2024-02-01" activeEnergyBurned="" activeEnergyBurnedGoal="400" activeEnergyBurnedUnit="kcal" appleMoveTime="0" appleMoveTimeGoal="0" appleExerciseTime="n/a" appleExerciseTimeGoal="30" appleStandHours="2" appleStandHoursGoal="12"/>
</HealthData>
"#;
